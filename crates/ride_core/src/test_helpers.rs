//! Test helpers for common test setup and utilities.
//!
//! Timings here are short enough to keep paused-clock tests cheap while keeping the default
//! number of ticks per leg.

use std::time::Duration;

use crate::config::{FullSimulationTiming, LifecycleConfig, ProgressionConfig};
use crate::controller::RideLifecycleController;
use crate::error::LifecycleResult;
use crate::state::RideEvent;
use crate::store::RideStateStream;

/// Default increments with 10 ms ticks and settle delay.
pub fn fast_config() -> LifecycleConfig {
    LifecycleConfig::default()
        .with_pickup_leg(ProgressionConfig::new(
            Duration::from_millis(10),
            0.01,
            Duration::from_millis(10),
        ))
        .with_dropoff_leg(ProgressionConfig::new(
            Duration::from_millis(10),
            0.005,
            Duration::from_millis(10),
        ))
        .with_full_simulation(FullSimulationTiming {
            offer_dwell: Duration::from_millis(30),
            accepted_dwell: Duration::from_millis(10),
            pickup_confirmation_dwell: Duration::from_millis(50),
            completed_dwell: Duration::from_millis(10),
            restart_delay: Duration::from_millis(5),
        })
}

/// Controller built from [fast_config].
pub fn fast_controller() -> RideLifecycleController {
    RideLifecycleController::with_config(fast_config()).expect("fast config should be valid")
}

/// Consumes snapshots until one is at `target`. Returns `false` if the stream ends first.
pub async fn wait_for_event(stream: &mut RideStateStream, target: RideEvent) -> bool {
    while let Some(state) = stream.next().await {
        if state.current_event == target {
            return true;
        }
    }
    false
}

/// Drives a fresh controller to PICKUP_CONFIRMATION, letting the pickup leg run out.
pub async fn drive_to_pickup_confirmation(
    controller: &RideLifecycleController,
) -> LifecycleResult<()> {
    let mut stream = controller.subscribe();
    controller.offer_ride().await?;
    controller.advance().await?;
    controller.advance().await?;
    assert!(
        wait_for_event(&mut stream, RideEvent::PickupConfirmation).await,
        "stream ended before PICKUP_CONFIRMATION"
    );
    Ok(())
}

/// Drives a fresh controller into HEADING_TO_DROPOFF through a confirmed pickup.
pub async fn drive_to_heading(controller: &RideLifecycleController) -> LifecycleResult<()> {
    drive_to_pickup_confirmation(controller).await?;
    controller.confirm_pickup().await?;
    Ok(())
}
