//! Timed progression: the background task that drives GET_TO_PICKUP and HEADING_TO_DROPOFF.
//!
//! A task owns one generation number. The controller bumps the generation under its lock
//! whenever it cancels, and the task re-checks it under the same lock before every write, so a
//! cancelled task can never publish. Tasks only hold a weak reference to the controller.

use std::sync::Weak;

use log::debug;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::command::{CurrentStep, RideCommand};
use crate::config::ProgressionConfig;
use crate::controller::ControllerInner;
use crate::state::RideEvent;

#[derive(Debug)]
pub(crate) struct ProgressionHandle {
    pub(crate) event: RideEvent,
    pub(crate) generation: u64,
    task: JoinHandle<()>,
}

impl ProgressionHandle {
    pub(crate) fn cancel(self) {
        self.task.abort();
    }
}

pub(crate) fn spawn_progression(
    inner: Weak<ControllerInner>,
    generation: u64,
    event: RideEvent,
    leg: ProgressionConfig,
) -> ProgressionHandle {
    debug!("starting {event:?} progression (generation {generation})");
    let task = tokio::spawn(run_progression(inner, generation, event, leg));
    ProgressionHandle {
        event,
        generation,
        task,
    }
}

async fn run_progression(
    weak: Weak<ControllerInner>,
    generation: u64,
    event: RideEvent,
    leg: ProgressionConfig,
) {
    let mut tick = 0u32;
    loop {
        sleep(leg.tick_interval).await;
        tick += 1;

        let Some(inner) = weak.upgrade() else {
            return;
        };
        let mut core = inner.core.lock().await;
        if core.generation != generation {
            return;
        }
        let state = inner.step(&mut core, CurrentStep::ProgressTick { tick });
        if state.current_event != event {
            return;
        }
        debug!(
            "{event:?} tick {tick}: {:.3} done, {}s left",
            state.progress.progress_percentage, state.progress.time_remaining
        );
        if state.progress.progress_percentage >= 1.0 {
            break;
        }
    }

    sleep(leg.settle_delay).await;

    let Some(inner) = weak.upgrade() else {
        return;
    };
    let mut core = inner.core.lock().await;
    if core.generation != generation {
        return;
    }
    // Detach first so the advance below does not abort the task running it.
    core.progression = None;
    debug!("{event:?} progression finished, advancing");
    // A rejection is already logged and counted by dispatch.
    let _ = inner.dispatch(&mut core, RideCommand::Advance);
}
