use bevy_ecs::prelude::{Res, ResMut};

use crate::command::CurrentStep;
use crate::config::LifecycleConfig;
use crate::progress::{leg_config, leg_endpoints, LegProfile};
use crate::state::{Passenger, PassengerStatus, RideEvent, RideState};

/// Applies one tick of the timed leg the state is in. Outside a timed leg it does nothing.
pub fn progress_tick_system(
    step: Res<CurrentStep>,
    config: Res<LifecycleConfig>,
    mut state: ResMut<RideState>,
) {
    let CurrentStep::ProgressTick { tick } = *step else {
        return;
    };
    let event = state.current_event;
    let (Some(profile), Some(leg)) = (LegProfile::for_event(event), leg_config(&config, event))
    else {
        return;
    };

    // Never step backwards within a run, even if a tick number repeats.
    let percentage = profile
        .percentage_at_tick(&leg, tick)
        .max(state.progress.progress_percentage);
    let fraction = profile.leg_fraction(percentage);

    let mut next = RideState {
        progress: profile.at(percentage),
        passengers: if event == RideEvent::HeadingToDropoff {
            staged_drop_offs(&state.passengers, fraction)
        } else {
            state.passengers.clone()
        },
        ..state.clone()
    };
    if let Some((origin, destination)) = leg_endpoints(&next, event) {
        next.move_vehicle_to(origin.lerp(destination, fraction as f64));
    }
    *state = next;
}

/// Passengers on board leave in list order: with `k` riders, rider `i` steps off once the leg
/// is `(i + 1) / k` done. The last rider is left for trip completion.
fn staged_drop_offs(passengers: &[Passenger], fraction: f32) -> Vec<Passenger> {
    let riders: Vec<usize> = passengers
        .iter()
        .enumerate()
        .filter(|(_, p)| {
            matches!(
                p.status,
                PassengerStatus::PickedUp | PassengerStatus::DroppedOff
            )
        })
        .map(|(index, _)| index)
        .collect();
    let k = riders.len();

    let mut next = passengers.to_vec();
    for (order, &index) in riders.iter().enumerate().take(k.saturating_sub(1)) {
        let threshold = (order + 1) as f32 / k as f32;
        if fraction >= threshold && next[index].status == PassengerStatus::PickedUp {
            next[index].status = PassengerStatus::DroppedOff;
        }
    }
    next
}
