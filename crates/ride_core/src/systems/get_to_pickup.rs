use bevy_ecs::prelude::{Res, ResMut};

use crate::command::CurrentStep;
use crate::progress::{baseline_progress, leg_endpoints};
use crate::state::{RideEvent, RideState};

/// PASSENGERS_ACCEPTED -> GET_TO_PICKUP. The vehicle sits at the route start until ticks move it.
pub fn get_to_pickup_system(step: Res<CurrentStep>, mut state: ResMut<RideState>) {
    if step.target() != Some(RideEvent::GetToPickup) {
        return;
    }

    let mut next = RideState {
        current_event: RideEvent::GetToPickup,
        progress: baseline_progress(RideEvent::GetToPickup, state.route.as_ref()),
        ..state.clone()
    };
    if let Some((origin, _)) = leg_endpoints(&next, RideEvent::GetToPickup) {
        next.move_vehicle_to(origin);
    }
    *state = next;
}
