use bevy_ecs::prelude::{Res, ResMut};

use crate::command::CurrentStep;
use crate::progress::{baseline_progress, leg_endpoints};
use crate::state::{RideEvent, RideState};

/// GET_TO_PICKUP -> PICKUP_CONFIRMATION. Whether reached by ticks or a manual advance,
/// the vehicle ends up at the pickup point.
pub fn pickup_confirmation_system(step: Res<CurrentStep>, mut state: ResMut<RideState>) {
    if step.target() != Some(RideEvent::PickupConfirmation) {
        return;
    }

    let mut next = RideState {
        current_event: RideEvent::PickupConfirmation,
        progress: baseline_progress(RideEvent::PickupConfirmation, state.route.as_ref()),
        ..state.clone()
    };
    if let Some((_, pickup)) = leg_endpoints(&next, RideEvent::GetToPickup) {
        next.move_vehicle_to(pickup);
    }
    *state = next;
}
