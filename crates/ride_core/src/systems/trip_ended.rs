use bevy_ecs::prelude::{Res, ResMut};

use crate::command::CurrentStep;
use crate::state::{RideEvent, RideState};

/// TRIP_COMPLETED -> TRIP_ENDED. Earnings and progress carry over for the summary.
pub fn trip_ended_system(step: Res<CurrentStep>, mut state: ResMut<RideState>) {
    if step.target() != Some(RideEvent::TripEnded) {
        return;
    }

    *state = RideState {
        current_event: RideEvent::TripEnded,
        ..state.clone()
    };
}
