use bevy_ecs::prelude::{Res, ResMut};

use crate::command::CurrentStep;
use crate::progress::baseline_progress;
use crate::state::{Passenger, PassengerStatus, RideEvent, RideState};

pub fn passengers_accepted_system(step: Res<CurrentStep>, mut state: ResMut<RideState>) {
    if step.target() != Some(RideEvent::PassengersAccepted) {
        return;
    }

    let passengers = state
        .passengers
        .iter()
        .map(|p| match p.status {
            PassengerStatus::Pending => Passenger {
                status: PassengerStatus::Accepted,
                ..p.clone()
            },
            _ => p.clone(),
        })
        .collect();

    *state = RideState {
        current_event: RideEvent::PassengersAccepted,
        passengers,
        progress: baseline_progress(RideEvent::PassengersAccepted, state.route.as_ref()),
        ..state.clone()
    };
}
