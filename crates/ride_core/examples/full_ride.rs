//! Runs one full ride with the default timing and prints every lifecycle change.
//!
//! `RUST_LOG=ride_core=debug cargo run -p ride_core --example full_ride` also shows ticks.

use ride_core::{RideEvent, RideLifecycleController};

#[tokio::main]
async fn main() {
    env_logger::init();

    let controller = RideLifecycleController::new();
    let mut stream = controller.subscribe();
    if let Err(err) = controller.start_full_simulation().await {
        eprintln!("could not start simulation: {err}");
        return;
    }

    let mut last_event = None;
    while let Some(state) = stream.next().await {
        if last_event != Some(state.current_event) {
            println!(
                "{:<22} step {}/{}  {:>3.0}%  {}s / {:.1} km left",
                format!("{:?}", state.current_event),
                state.progress.current_step,
                state.progress.total_steps,
                state.progress.progress_percentage * 100.0,
                state.progress.time_remaining,
                state.progress.distance_remaining,
            );
            for passenger in &state.passengers {
                println!("    {:<16} {:?}", passenger.name, passenger.status);
            }
            last_event = Some(state.current_event);
        }
        if state.current_event == RideEvent::TripEnded {
            if let Some(earnings) = &state.earnings {
                println!(
                    "\nEarnings: {}{:.2} (base {:.2} + bonus {:.2} - commission {:.2}), {:.1} kg CO2 avoided",
                    earnings.currency,
                    earnings.total(),
                    earnings.base_amount,
                    earnings.bonus,
                    earnings.commission,
                    earnings.carbon_emission_avoided,
                );
            }
            break;
        }
    }

    let telemetry = controller.telemetry().await;
    println!(
        "\n--- {} transitions, {} progress ticks, {} rejected commands ---",
        telemetry.transitions.len(),
        telemetry.progress_ticks,
        telemetry.rejected_commands
    );
}
