/// round-trip travel time for a trip with the given one-way segment times.
/// the return trip is assumed to take as long as the outward trip. a
/// non-positive one-way total yields 0.
pub fn round_trip_duration(segments: &[i32]) -> u32 {
    let one_way: i64 = segments.iter().map(|d| *d as i64).sum();
    if one_way <= 0 {
        0
    } else {
        u32::try_from(one_way * 2).unwrap_or(u32::MAX)
    }
}

/// number of vehicles (tours) needed to keep a frequency over a round trip.
/// None when the frequency is 0.
pub fn tour_count(duration: u32, frequency_in_minutes: u32) -> Option<u32> {
    if frequency_in_minutes == 0 {
        None
    } else {
        Some(duration.div_ceil(frequency_in_minutes))
    }
}

/// minutes from the first stop to each stop, starting with 0.
pub fn cumulative_offsets(segments: &[i32]) -> Vec<u32> {
    let mut offsets = Vec::with_capacity(segments.len() + 1);
    let mut acc: u32 = 0;
    offsets.push(acc);
    for segment in segments {
        acc = acc.saturating_add((*segment).max(0) as u32);
        offsets.push(acc);
    }
    offsets
}
