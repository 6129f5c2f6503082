/// hands out schedule ids for one route. ids are unique across every
/// frequency pattern and timetable generated through the same sequence.
#[derive(Debug, Clone)]
pub struct ScheduleIdSequence {
    next: u32,
}

impl Default for ScheduleIdSequence {
    fn default() -> Self {
        ScheduleIdSequence { next: 1 }
    }
}

impl ScheduleIdSequence {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}
