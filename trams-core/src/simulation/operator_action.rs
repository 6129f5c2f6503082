use serde::{Deserialize, Serialize};

use super::{SimulationContext, SimulationError};
use crate::{model::ScheduleKey, position::VehiclePosition};

/// manual interventions an operator can take to recover a late vehicle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum OperatorAction {
    /// only serve the stops from `start_pos` to `end_pos` (inclusive) of a
    /// service, turning the vehicle early.
    ShortenService {
        schedule: ScheduleKey,
        service_id: u32,
        start_pos: usize,
        end_pos: usize,
    },
    /// run a service empty without calling at any stop.
    OutOfService {
        schedule: ScheduleKey,
        service_id: u32,
    },
}

/// effect of an operator action on the game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub delay_reduction: i32,
    /// delay of the allocated vehicle afterwards, None if the schedule is unassigned
    pub delay: Option<i32>,
    pub passenger_satisfaction: f64,
    pub position: VehiclePosition,
}

pub fn apply_operator_action(
    context: &mut SimulationContext,
    action: &OperatorAction,
) -> Result<ActionOutcome, SimulationError> {
    let (schedule, delay_reduction, cost) = match action {
        OperatorAction::ShortenService {
            schedule,
            service_id,
            start_pos,
            end_pos,
        } => {
            let reduction = shorten_service(context, schedule, *service_id, *start_pos, *end_pos)?;
            let cost = context.policy.shorten_service_satisfaction_cost;
            (schedule, reduction, cost)
        }
        OperatorAction::OutOfService {
            schedule,
            service_id,
        } => {
            let reduction = take_out_of_service(context, schedule, *service_id)?;
            let cost = context.policy.out_of_service_satisfaction_cost;
            (schedule, reduction, cost)
        }
    };

    let delay_policy = context.policy.delay_policy;
    let fleet_number = context
        .allocation_for(schedule)
        .map(|a| a.fleet_number.clone());
    let delay = fleet_number.and_then(|f| {
        context
            .vehicle_mut(&f)
            .map(|v| v.adjust_delay(-delay_reduction, delay_policy))
    });
    let passenger_satisfaction = context.adjust_satisfaction(-cost);
    let position = context.position_of(schedule);
    log::info!(
        "operator action on schedule {schedule}: delay reduced by {delay_reduction} min, satisfaction now {passenger_satisfaction:.1}%, vehicle at {position}"
    );
    Ok(ActionOutcome {
        delay_reduction,
        delay,
        passenger_satisfaction,
        position,
    })
}

/// narrows the stop range and returns the running time saved.
fn shorten_service(
    context: &mut SimulationContext,
    key: &ScheduleKey,
    service_id: u32,
    start_pos: usize,
    end_pos: usize,
) -> Result<i32, SimulationError> {
    let service = context
        .schedule_mut(key)
        .ok_or_else(|| SimulationError::UnknownSchedule(key.clone()))?
        .get_service_mut(service_id)
        .ok_or_else(|| SimulationError::UnknownService {
            schedule: key.clone(),
            service_id,
        })?;
    let stop_count = service.stop_times.len();
    if start_pos >= end_pos || end_pos >= stop_count {
        return Err(SimulationError::InvalidStopRange {
            schedule: key.clone(),
            service_id,
            start_pos,
            end_pos,
            stop_count,
        });
    }
    let before = service.effective_running_time();
    service.temp_start_stop_pos = Some(start_pos);
    service.temp_end_stop_pos = Some(end_pos);
    let after = service.effective_running_time();
    Ok((before - after).max(0))
}

/// flags the service and returns the configured share of the round trip.
fn take_out_of_service(
    context: &mut SimulationContext,
    key: &ScheduleKey,
    service_id: u32,
) -> Result<i32, SimulationError> {
    let fraction = context.policy.out_of_service_delay_fraction;
    let service = context
        .schedule_mut(key)
        .ok_or_else(|| SimulationError::UnknownSchedule(key.clone()))?
        .get_service_mut(service_id)
        .ok_or_else(|| SimulationError::UnknownService {
            schedule: key.clone(),
            service_id,
        })?;
    if service.out_of_service {
        return Err(SimulationError::AlreadyOutOfService {
            schedule: key.clone(),
            service_id,
        });
    }
    service.out_of_service = true;
    let round_trip = 2 * service.running_time().max(0);
    Ok((fraction * round_trip as f64).round() as i32)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        model::DelayPolicy,
        simulation::fixture::{context, date_time},
    };

    fn shorten(route: &str, service_id: u32, start_pos: usize, end_pos: usize) -> OperatorAction {
        OperatorAction::ShortenService {
            schedule: ScheduleKey::new(route, 1),
            service_id,
            start_pos,
            end_pos,
        }
    }

    fn out_of_service(route: &str, service_id: u32) -> OperatorAction {
        OperatorAction::OutOfService {
            schedule: ScheduleKey::new(route, 1),
            service_id,
        }
    }

    #[test]
    fn test_shorten_service_recovers_skipped_running_time() {
        let mut ctx = context();
        ctx.current_date_time = date_time((2024, 5, 6), "09:20");
        ctx.assign(ScheduleKey::new("3", 1), "101").unwrap();
        ctx.vehicle_mut("101").unwrap().delay = 20;

        let outcome = apply_operator_action(&mut ctx, &shorten("3", 0, 0, 1)).unwrap();
        assert_eq!(outcome.delay_reduction, 15);
        assert_eq!(outcome.delay, Some(5));
        assert_eq!(outcome.passenger_satisfaction, 95.0);
        assert_eq!(outcome.position.stop(), "Harbour");
        assert_eq!(outcome.position.destination(), "Harbour");

        let service = &ctx.schedule(&ScheduleKey::new("3", 1)).unwrap().services[0];
        assert!(service.is_shortened());
        assert_eq!(service.destination().unwrap().stop, "Harbour");
    }

    #[test]
    fn test_shorten_service_rejects_bad_ranges() {
        let mut ctx = context();
        for (start, end) in [(1, 1), (2, 1), (0, 3)] {
            let result = apply_operator_action(&mut ctx, &shorten("3", 0, start, end));
            assert!(matches!(
                result,
                Err(SimulationError::InvalidStopRange { stop_count: 3, .. })
            ));
        }
        assert_eq!(ctx.passenger_satisfaction, 100.0);
    }

    #[test]
    fn test_out_of_service_recovers_share_of_round_trip() {
        let mut ctx = context();
        ctx.current_date_time = date_time((2024, 5, 6), "06:45");
        ctx.assign(ScheduleKey::new("1", 1), "101").unwrap();
        ctx.vehicle_mut("101").unwrap().delay = 10;

        let outcome = apply_operator_action(&mut ctx, &out_of_service("1", 1)).unwrap();
        assert_eq!(outcome.delay_reduction, 6);
        assert_eq!(outcome.delay, Some(4));
        assert_eq!(outcome.passenger_satisfaction, 97.0);
        assert!(outcome.position.is_depot());

        let again = apply_operator_action(&mut ctx, &out_of_service("1", 1));
        assert!(matches!(
            again,
            Err(SimulationError::AlreadyOutOfService { service_id: 1, .. })
        ));
        assert_eq!(ctx.passenger_satisfaction, 97.0);
    }

    #[test]
    fn test_action_on_unassigned_schedule_still_costs_satisfaction() {
        let mut ctx = context();
        let outcome = apply_operator_action(&mut ctx, &out_of_service("2", 0)).unwrap();
        assert_eq!(outcome.delay, None);
        assert_eq!(outcome.delay_reduction, 3);
        assert_eq!(outcome.passenger_satisfaction, 97.0);
        assert!(outcome.position.is_depot());
    }

    #[test]
    fn test_floored_delay_does_not_go_negative() {
        let mut ctx = context();
        ctx.policy.delay_policy = DelayPolicy::Floored;
        ctx.assign(ScheduleKey::new("3", 1), "101").unwrap();
        ctx.vehicle_mut("101").unwrap().delay = 2;
        let outcome = apply_operator_action(&mut ctx, &shorten("3", 1, 1, 2)).unwrap();
        assert_eq!(outcome.delay_reduction, 15);
        assert_eq!(outcome.delay, Some(0));
    }

    #[test]
    fn test_unknown_service_is_an_error() {
        let mut ctx = context();
        assert_eq!(
            apply_operator_action(&mut ctx, &out_of_service("1", 9)),
            Err(SimulationError::UnknownService {
                schedule: ScheduleKey::new("1", 1),
                service_id: 9,
            })
        );
        assert_eq!(
            apply_operator_action(&mut ctx, &out_of_service("7", 0)),
            Err(SimulationError::UnknownSchedule(ScheduleKey::new("7", 1)))
        );
    }
}
