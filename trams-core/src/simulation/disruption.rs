use std::fmt::Display;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::SimulationContext;
use crate::model::{Allocation, ScheduleKey};

/// source of randomness for disruptions. every [`rand::Rng`] is a dice; tests
/// script the outcomes.
pub trait DisruptionDice {
    /// uniform draw from 0 to 9 inclusive.
    fn roll(&mut self) -> u32;
    /// uniform index below `len`. only called with `len > 0`.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: Rng> DisruptionDice for R {
    fn roll(&mut self) -> u32 {
        self.random_range(0..=9)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum DisruptionEvent {
    /// the vehicle broke down and its allocation was removed.
    Breakdown { allocation: Allocation },
    /// demand on the route requires an extra tour.
    AdditionalTour { key: ScheduleKey },
}

impl Display for DisruptionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisruptionEvent::Breakdown { allocation } => write!(
                f,
                "Vehicle {} has broken down. Route {} tour {} is back in the depot.",
                allocation.fleet_number, allocation.schedule.route_number, allocation.schedule.id
            ),
            DisruptionEvent::AdditionalTour { key } => write!(
                f,
                "Passenger numbers on route {} are rising. Additional tour {} has been added.",
                key.route_number, key.id
            ),
        }
    }
}

/// perturbs the game with exactly one random event. an even roll breaks down
/// the vehicle of a random allocation, an odd roll adds an extra tour to the
/// route of a random allocation. without allocations nothing happens.
pub fn apply_random_disruption<D: DisruptionDice + ?Sized>(
    context: &mut SimulationContext,
    dice: &mut D,
) -> Option<DisruptionEvent> {
    if context.allocations.is_empty() {
        log::debug!("no allocations, skipping disruption");
        return None;
    }
    let roll = dice.roll();
    let index = dice
        .pick(context.allocations.len())
        .min(context.allocations.len() - 1);
    let event = if roll % 2 == 0 {
        let allocation = context.allocations.remove(index);
        DisruptionEvent::Breakdown { allocation }
    } else {
        let route_number = context.allocations[index].schedule.route_number.clone();
        let key = context.add_additional_tour(&route_number);
        DisruptionEvent::AdditionalTour { key }
    };
    log::info!("{event}");
    Some(event)
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use crate::simulation::fixture::context;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::VecDeque;

    /// dice returning pre-recorded rolls and picks.
    pub struct ScriptedDice {
        pub rolls: VecDeque<u32>,
        pub picks: VecDeque<usize>,
    }

    impl ScriptedDice {
        pub fn new(rolls: &[u32], picks: &[usize]) -> ScriptedDice {
            ScriptedDice {
                rolls: rolls.iter().copied().collect(),
                picks: picks.iter().copied().collect(),
            }
        }
    }

    impl DisruptionDice for ScriptedDice {
        fn roll(&mut self) -> u32 {
            self.rolls.pop_front().unwrap()
        }

        fn pick(&mut self, _len: usize) -> usize {
            self.picks.pop_front().unwrap()
        }
    }

    fn allocated_context() -> SimulationContext {
        let mut ctx = context();
        ctx.assign(ScheduleKey::new("1", 1), "101").unwrap();
        ctx.assign(ScheduleKey::new("1", 2), "102").unwrap();
        ctx.assign(ScheduleKey::new("2", 1), "103").unwrap();
        ctx
    }

    #[test]
    fn test_even_roll_breaks_down_picked_vehicle() {
        let mut ctx = allocated_context();
        let mut dice = ScriptedDice::new(&[4], &[1]);
        let event = apply_random_disruption(&mut ctx, &mut dice).unwrap();
        assert_eq!(
            event,
            DisruptionEvent::Breakdown {
                allocation: Allocation::new(ScheduleKey::new("1", 2), "102")
            }
        );
        assert_eq!(ctx.allocations.len(), 2);
        assert!(ctx.position_of(&ScheduleKey::new("1", 2)).is_depot());
        assert!(ctx.additional_tours.is_empty());
    }

    #[test]
    fn test_odd_roll_adds_tour_on_picked_route() {
        let mut ctx = allocated_context();
        let mut dice = ScriptedDice::new(&[7, 3], &[2, 0]);
        let first = apply_random_disruption(&mut ctx, &mut dice).unwrap();
        assert_eq!(
            first,
            DisruptionEvent::AdditionalTour {
                key: ScheduleKey::new("2", 3)
            }
        );
        let second = apply_random_disruption(&mut ctx, &mut dice).unwrap();
        assert_eq!(
            second,
            DisruptionEvent::AdditionalTour {
                key: ScheduleKey::new("1", 3)
            }
        );
        assert_eq!(ctx.allocations.len(), 3);
        assert_eq!(ctx.additional_tours.len(), 2);
        assert_eq!(ctx.next_tour_number("2"), 4);
    }

    #[test]
    fn test_no_allocations_is_a_no_op() {
        let mut ctx = context();
        let mut dice = ScriptedDice::new(&[], &[]);
        assert_eq!(apply_random_disruption(&mut ctx, &mut dice), None);
        assert_eq!(ctx, context());
    }

    #[test]
    fn test_notice_names_route_and_tour() {
        let event = DisruptionEvent::AdditionalTour {
            key: ScheduleKey::new("12", 5),
        };
        assert_eq!(
            event.to_string(),
            "Passenger numbers on route 12 are rising. Additional tour 5 has been added."
        );
    }

    #[test]
    fn test_seeded_rng_is_repeatable() {
        let run = || {
            let mut ctx = allocated_context();
            let mut rng = ChaCha8Rng::seed_from_u64(7);
            (0..3)
                .filter_map(|_| apply_random_disruption(&mut ctx, &mut rng))
                .collect::<Vec<_>>()
        };
        let first = run();
        assert!(!first.is_empty());
        assert_eq!(first, run());
    }
}
