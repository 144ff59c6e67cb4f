//! Ride lifecycle controller: the single writer of the session store.
//!
//! Commands are serialized through one async mutex around the ECS world, which is the
//! single-writer critical section. Each accepted command cancels any running progression,
//! runs through the lifecycle schedule and publishes exactly one snapshot.

use std::sync::{Arc, Weak};

use bevy_ecs::prelude::{Schedule, World};
use log::{debug, info, warn};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::command::{CurrentStep, RideCommand};
use crate::config::{FullSimulationTiming, LifecycleConfig};
use crate::error::{LifecycleError, LifecycleResult};
use crate::lifecycle::transition;
use crate::progress::leg_config;
use crate::progression::{spawn_progression, ProgressionHandle};
use crate::runner::{lifecycle_schedule, lifecycle_world, run_step};
use crate::state::{RideEvent, RideState};
use crate::store::{RideSessionStore, RideStateStream};
use crate::telemetry::RideTelemetry;

pub(crate) struct ControllerCore {
    world: World,
    schedule: Schedule,
    pub(crate) generation: u64,
    pub(crate) progression: Option<ProgressionHandle>,
    script: Option<JoinHandle<()>>,
}

impl ControllerCore {
    fn cancel_progression(&mut self) {
        self.generation += 1;
        if let Some(handle) = self.progression.take() {
            debug!(
                "cancelling {:?} progression (generation {})",
                handle.event, handle.generation
            );
            handle.cancel();
        }
    }

    fn cancel_script(&mut self) {
        if let Some(script) = self.script.take() {
            debug!("cancelling full simulation script");
            script.abort();
        }
    }
}

impl Drop for ControllerCore {
    fn drop(&mut self) {
        self.cancel_progression();
        self.cancel_script();
    }
}

pub(crate) struct ControllerInner {
    store: RideSessionStore,
    config: LifecycleConfig,
    pub(crate) core: Mutex<ControllerCore>,
    self_ref: Weak<ControllerInner>,
}

impl ControllerInner {
    /// Runs one step and publishes the result.
    pub(crate) fn step(&self, core: &mut ControllerCore, step: CurrentStep) -> Arc<RideState> {
        let state = run_step(&mut core.world, &mut core.schedule, step);
        self.store.replace(state)
    }

    /// Validates `command` against the transition table and applies it.
    pub(crate) fn dispatch(
        &self,
        core: &mut ControllerCore,
        command: RideCommand,
    ) -> LifecycleResult<RideEvent> {
        let from = core.world.resource::<RideState>().current_event;
        let Some(to) = transition(from, &command) else {
            core.world.resource_mut::<RideTelemetry>().record_rejection();
            warn!("ignoring {command} in {from:?}: no such transition");
            return Err(LifecycleError::IllegalTransition { from, command });
        };
        if let RideCommand::ReportNoShow(id) = &command {
            if core.world.resource::<RideState>().passenger(id).is_none() {
                core.world.resource_mut::<RideTelemetry>().record_rejection();
                warn!("ignoring no-show for unknown passenger {id}");
                return Err(LifecycleError::UnknownPassenger(id.clone()));
            }
        }

        core.cancel_progression();
        info!("{from:?} --{command}--> {to:?}");
        self.step(core, CurrentStep::Transition { command, from, to });

        if let Some(leg) = leg_config(&self.config, to) {
            core.progression = Some(spawn_progression(
                self.self_ref.clone(),
                core.generation,
                to,
                leg,
            ));
        }
        Ok(to)
    }
}

/// Owns one ride session. Cloning yields another handle to the same session.
#[derive(Clone)]
pub struct RideLifecycleController {
    inner: Arc<ControllerInner>,
}

impl Default for RideLifecycleController {
    fn default() -> Self {
        Self::new()
    }
}

impl RideLifecycleController {
    /// Controller with the default timing, seats and earnings.
    pub fn new() -> Self {
        Self::build(LifecycleConfig::default())
    }

    pub fn with_config(config: LifecycleConfig) -> LifecycleResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: LifecycleConfig) -> Self {
        let inner = Arc::new_cyclic(|self_ref| ControllerInner {
            store: RideSessionStore::default(),
            core: Mutex::new(ControllerCore {
                world: lifecycle_world(config.clone()),
                schedule: lifecycle_schedule(),
                generation: 0,
                progression: None,
                script: None,
            }),
            config,
            self_ref: self_ref.clone(),
        });
        Self { inner }
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.inner.config
    }

    pub fn current(&self) -> Arc<RideState> {
        self.inner.store.current()
    }

    pub fn subscribe(&self) -> RideStateStream {
        self.inner.store.subscribe()
    }

    async fn command(&self, command: RideCommand) -> LifecycleResult<RideEvent> {
        let mut core = self.inner.core.lock().await;
        self.inner.dispatch(&mut core, command)
    }

    pub async fn offer_ride(&self) -> LifecycleResult<RideEvent> {
        self.command(RideCommand::OfferRide).await
    }

    pub async fn advance(&self) -> LifecycleResult<RideEvent> {
        self.command(RideCommand::Advance).await
    }

    pub async fn confirm_pickup(&self) -> LifecycleResult<RideEvent> {
        self.command(RideCommand::ConfirmPickup).await
    }

    pub async fn report_no_show(
        &self,
        passenger_id: impl Into<String>,
    ) -> LifecycleResult<RideEvent> {
        self.command(RideCommand::ReportNoShow(passenger_id.into())).await
    }

    /// Discards the session. Any running progression and full-simulation script stop first.
    pub async fn reset(&self) -> LifecycleResult<RideEvent> {
        let mut core = self.inner.core.lock().await;
        let from = core.world.resource::<RideState>().current_event;
        if transition(from, &RideCommand::Reset).is_some() {
            core.cancel_script();
        }
        self.inner.dispatch(&mut core, RideCommand::Reset)
    }

    /// Offers a ride and spawns the script that walks it to TRIP_ENDED with the configured
    /// dwell times. Timed legs advance on their own; the script waits for them.
    ///
    /// The script subscribes before the lock is released, so it sees OFFER_RIDE_AVAILABLE
    /// even if another command lands before it first runs.
    pub async fn start_full_simulation(&self) -> LifecycleResult<()> {
        let mut core = self.inner.core.lock().await;
        self.inner.dispatch(&mut core, RideCommand::OfferRide)?;
        core.cancel_script();

        let stream = self.inner.store.subscribe();
        let timing = self.inner.config.full_simulation;
        let weak = Arc::downgrade(&self.inner);
        core.script = Some(tokio::spawn(async move {
            if let Err(err) = run_full_simulation(weak, timing, stream).await {
                warn!("full simulation stopped: {err}");
            }
        }));
        Ok(())
    }

    /// Resets an active session, waits the restart delay, then starts a full simulation.
    pub async fn start_new_trip(&self) -> LifecycleResult<()> {
        if self.current().is_active() {
            self.reset().await?;
        }
        sleep(self.inner.config.full_simulation.restart_delay).await;
        self.start_full_simulation().await
    }

    pub async fn telemetry(&self) -> RideTelemetry {
        let core = self.inner.core.lock().await;
        core.world.resource::<RideTelemetry>().clone()
    }

    /// Whether a timed-progression task is currently running.
    pub async fn is_progressing(&self) -> bool {
        self.inner.core.lock().await.progression.is_some()
    }
}

/// Waits until the session reaches `target`. Gives up if the session is reset, dropped, or
/// has already moved past `target`.
async fn wait_for(stream: &mut RideStateStream, target: RideEvent) -> bool {
    while let Some(state) = stream.next().await {
        if state.current_event == target {
            return true;
        }
        if !state.is_active() {
            return false;
        }
        if state.current_event > target {
            warn!(
                "full simulation expected {target:?} but the session is at {:?}",
                state.current_event
            );
            return false;
        }
    }
    false
}

async fn run_full_simulation(
    weak: Weak<ControllerInner>,
    timing: FullSimulationTiming,
    mut stream: RideStateStream,
) -> LifecycleResult<()> {
    let steps = [
        (RideEvent::OfferRideAvailable, timing.offer_dwell, RideCommand::Advance),
        (RideEvent::PassengersAccepted, timing.accepted_dwell, RideCommand::Advance),
        (
            RideEvent::PickupConfirmation,
            timing.pickup_confirmation_dwell,
            RideCommand::ConfirmPickup,
        ),
        (RideEvent::TripCompleted, timing.completed_dwell, RideCommand::Advance),
    ];

    for (event, dwell, command) in steps {
        if !wait_for(&mut stream, event).await {
            return Ok(());
        }
        sleep(dwell).await;

        let Some(inner) = weak.upgrade() else {
            return Ok(());
        };
        let mut core = inner.core.lock().await;
        let now = core.world.resource::<RideState>().current_event;
        if now != event {
            // Someone else already moved the session on; pick up from the next step.
            debug!("full simulation skipping {command} in {now:?}");
            continue;
        }
        inner.dispatch(&mut core, command)?;
    }
    info!("full simulation reached {:?}", RideEvent::TripEnded);
    Ok(())
}
