//! Single-vehicle ride lifecycle: a driven state machine with timed progression.
//!
//! [controller::RideLifecycleController] is the only writer. Observers read snapshots through
//! [store::RideSessionStore] via `subscribe` or `current`.

pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod lifecycle;
pub mod progress;
mod progression;
pub mod runner;
pub mod sample;
pub mod state;
pub mod store;
pub mod systems;
pub mod telemetry;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;

pub use command::RideCommand;
pub use config::LifecycleConfig;
pub use controller::RideLifecycleController;
pub use error::{LifecycleError, LifecycleResult};
pub use state::{PassengerStatus, RideEvent, RideState};
pub use store::{RideSessionStore, RideStateStream};
