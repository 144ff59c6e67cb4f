use bevy_ecs::prelude::{Res, ResMut};

use crate::command::{CurrentStep, RideCommand};
use crate::config::LifecycleConfig;
use crate::progress::{baseline_progress, leg_endpoints};
use crate::state::{Passenger, PassengerStatus, RideEvent, RideState, Vehicle};

/// PICKUP_CONFIRMATION -> HEADING_TO_DROPOFF, via either a confirmed pickup or a no-show.
///
/// Accepted passengers board. A reported no-show diverts that one passenger and frees a seat,
/// capped at the configured maximum.
pub fn heading_to_dropoff_system(
    step: Res<CurrentStep>,
    config: Res<LifecycleConfig>,
    mut state: ResMut<RideState>,
) {
    if step.target() != Some(RideEvent::HeadingToDropoff) {
        return;
    }
    let no_show = match step.command() {
        Some(RideCommand::ReportNoShow(id)) => Some(id.as_str()),
        _ => None,
    };

    let mut freed_seat = false;
    let passengers: Vec<Passenger> = state
        .passengers
        .iter()
        .map(|p| {
            let next = if Some(p.id.as_str()) == no_show {
                PassengerStatus::NoShow
            } else if p.status == PassengerStatus::Accepted {
                PassengerStatus::PickedUp
            } else {
                p.status
            };
            if !p.status.can_become(next) {
                return p.clone();
            }
            if next == PassengerStatus::NoShow && p.status != PassengerStatus::NoShow {
                freed_seat = true;
            }
            Passenger {
                status: next,
                ..p.clone()
            }
        })
        .collect();

    // Seats are freed per no-show without checking how many are actually occupied.
    let vehicle = state.vehicle.as_ref().map(|v| Vehicle {
        available_seats: if freed_seat {
            v.available_seats.saturating_add(1).min(config.seats.max_available)
        } else {
            v.available_seats
        },
        ..v.clone()
    });

    let mut next = RideState {
        current_event: RideEvent::HeadingToDropoff,
        passengers,
        vehicle,
        progress: baseline_progress(RideEvent::HeadingToDropoff, state.route.as_ref()),
        ..state.clone()
    };
    if let Some((origin, _)) = leg_endpoints(&next, RideEvent::HeadingToDropoff) {
        next.move_vehicle_to(origin);
    }
    *state = next;
}
