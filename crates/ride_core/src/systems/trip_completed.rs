use bevy_ecs::prelude::{Res, ResMut};

use crate::command::CurrentStep;
use crate::config::LifecycleConfig;
use crate::progress::baseline_progress;
use crate::state::{Passenger, PassengerStatus, RideEarnings, RideEvent, RideState};

/// HEADING_TO_DROPOFF -> TRIP_COMPLETED: drops everyone still on board and books earnings.
pub fn trip_completed_system(
    step: Res<CurrentStep>,
    config: Res<LifecycleConfig>,
    mut state: ResMut<RideState>,
) {
    if step.target() != Some(RideEvent::TripCompleted) {
        return;
    }

    let passengers = state
        .passengers
        .iter()
        .map(|p| match p.status {
            PassengerStatus::PickedUp => Passenger {
                status: PassengerStatus::DroppedOff,
                ..p.clone()
            },
            _ => p.clone(),
        })
        .collect();

    let earnings = &config.earnings;
    let mut next = RideState {
        current_event: RideEvent::TripCompleted,
        passengers,
        progress: baseline_progress(RideEvent::TripCompleted, state.route.as_ref()),
        earnings: Some(RideEarnings {
            base_amount: earnings.base_amount,
            bonus: earnings.bonus,
            commission: earnings.commission,
            currency: earnings.currency.clone(),
            carbon_emission_avoided: earnings.carbon_emission_avoided,
        }),
        ..state.clone()
    };
    if let Some(end) = state.route.as_ref().map(|r| r.end_location.coordinates) {
        next.move_vehicle_to(end);
    }
    *state = next;
}
