use bevy_ecs::prelude::{Res, ResMut};

use crate::command::CurrentStep;
use crate::state::{RideEvent, RideState};

/// Any active event -> IDLE. The session is discarded wholesale.
pub fn reset_system(step: Res<CurrentStep>, mut state: ResMut<RideState>) {
    if step.target() != Some(RideEvent::Idle) {
        return;
    }

    *state = RideState::idle();
}
