use std::time::Duration;

use ride_core::command::RideCommand;
use ride_core::lifecycle::transition;
use ride_core::sample::{FIRST_PASSENGER_ID, SECOND_PASSENGER_ID};
use ride_core::state::{PassengerStatus, RideEvent, RideState};
use ride_core::test_helpers::{drive_to_pickup_confirmation, fast_controller, wait_for_event};
use ride_core::{LifecycleConfig, LifecycleError, RideLifecycleController};

fn all_commands() -> Vec<RideCommand> {
    vec![
        RideCommand::OfferRide,
        RideCommand::Advance,
        RideCommand::ConfirmPickup,
        RideCommand::ReportNoShow(FIRST_PASSENGER_ID.to_string()),
        RideCommand::Reset,
    ]
}

async fn issue(
    controller: &RideLifecycleController,
    command: &RideCommand,
) -> Result<RideEvent, LifecycleError> {
    match command {
        RideCommand::OfferRide => controller.offer_ride().await,
        RideCommand::Advance => controller.advance().await,
        RideCommand::ConfirmPickup => controller.confirm_pickup().await,
        RideCommand::ReportNoShow(id) => controller.report_no_show(id.clone()).await,
        RideCommand::Reset => controller.reset().await,
    }
}

/// Every command without an edge from the current state is rejected and publishes nothing.
async fn assert_illegal_commands_are_no_ops(controller: &RideLifecycleController) {
    let before: RideState = (*controller.current()).clone();
    let mut stream = controller.subscribe();
    stream.drain();

    for command in all_commands() {
        if transition(before.current_event, &command).is_some() {
            continue;
        }
        let result = issue(controller, &command).await;
        assert_eq!(
            result,
            Err(LifecycleError::IllegalTransition {
                from: before.current_event,
                command: command.clone(),
            })
        );
        assert_eq!(*controller.current(), before, "{command} changed state");
    }
    assert!(stream.try_next().is_none(), "rejected command published");
}

#[tokio::test(start_paused = true)]
async fn offer_ride_populates_the_session() {
    let controller = RideLifecycleController::new();
    assert_eq!(controller.current().current_event, RideEvent::Idle);

    let reached = controller.offer_ride().await;
    assert_eq!(reached, Ok(RideEvent::OfferRideAvailable));

    let state = controller.current();
    assert_eq!(state.current_event, RideEvent::OfferRideAvailable);
    assert_eq!(state.passengers.len(), 2);
    assert!(state.is_simulating);
    assert!(state.driver.is_some());
    assert!(state.vehicle.is_some());
    assert!(state.route.is_some());
    assert!(state.earnings.is_none());
}

#[tokio::test(start_paused = true)]
async fn illegal_commands_leave_state_unchanged_at_every_resting_state() {
    let controller = fast_controller();
    assert_illegal_commands_are_no_ops(&controller).await;

    controller.offer_ride().await.expect("offer");
    assert_illegal_commands_are_no_ops(&controller).await;

    controller.advance().await.expect("accept");
    assert_illegal_commands_are_no_ops(&controller).await;

    let mut stream = controller.subscribe();
    controller.advance().await.expect("get to pickup");
    assert!(wait_for_event(&mut stream, RideEvent::PickupConfirmation).await);
    assert_illegal_commands_are_no_ops(&controller).await;

    controller.confirm_pickup().await.expect("confirm");
    assert!(wait_for_event(&mut stream, RideEvent::TripCompleted).await);
    assert_illegal_commands_are_no_ops(&controller).await;

    controller.advance().await.expect("end");
    assert_illegal_commands_are_no_ops(&controller).await;

    let telemetry = controller.telemetry().await;
    assert!(telemetry.rejected_commands > 0);
}

#[tokio::test(start_paused = true)]
async fn passengers_accepted_then_heading_to_pickup() {
    let controller = fast_controller();
    controller.offer_ride().await.expect("offer");
    controller.advance().await.expect("accept");

    let state = controller.current();
    assert_eq!(state.current_event, RideEvent::PassengersAccepted);
    assert!(state
        .passengers
        .iter()
        .all(|p| p.status == PassengerStatus::Accepted));

    controller.advance().await.expect("get to pickup");
    let state = controller.current();
    assert_eq!(state.current_event, RideEvent::GetToPickup);
    assert_eq!(state.progress.current_step, 1);
    assert_eq!(state.progress.total_steps, 4);
    assert!(controller.is_progressing().await);
}

#[tokio::test(start_paused = true)]
async fn no_show_diverts_one_passenger_and_boards_the_other() {
    let controller = fast_controller();
    drive_to_pickup_confirmation(&controller)
        .await
        .expect("pickup confirmation");
    let seats_before = controller
        .current()
        .vehicle
        .as_ref()
        .map(|v| v.available_seats)
        .expect("vehicle");

    let reached = controller.report_no_show(FIRST_PASSENGER_ID).await;
    assert_eq!(reached, Ok(RideEvent::HeadingToDropoff));

    let state = controller.current();
    assert_eq!(
        state.passenger(FIRST_PASSENGER_ID).map(|p| p.status),
        Some(PassengerStatus::NoShow)
    );
    assert_eq!(
        state.passenger(SECOND_PASSENGER_ID).map(|p| p.status),
        Some(PassengerStatus::PickedUp)
    );
    let max = controller.config().seats.max_available;
    assert_eq!(
        state.vehicle.as_ref().map(|v| v.available_seats),
        Some((seats_before + 1).min(max))
    );
    assert_eq!(state.progress.current_step, 3);
}

#[tokio::test(start_paused = true)]
async fn unknown_passenger_no_show_is_ignored() {
    let controller = fast_controller();
    drive_to_pickup_confirmation(&controller)
        .await
        .expect("pickup confirmation");
    let before = controller.current();
    let mut stream = controller.subscribe();
    stream.drain();

    let result = controller.report_no_show("passenger_999").await;
    assert_eq!(
        result,
        Err(LifecycleError::UnknownPassenger("passenger_999".to_string()))
    );
    assert_eq!(*controller.current(), *before);
    assert!(stream.try_next().is_none());
}

#[tokio::test(start_paused = true)]
async fn manual_advance_on_a_timed_leg_cancels_the_auto_advance() {
    let controller = fast_controller();
    controller.offer_ride().await.expect("offer");
    controller.advance().await.expect("accept");
    controller.advance().await.expect("get to pickup");

    let reached = controller.advance().await;
    assert_eq!(reached, Ok(RideEvent::PickupConfirmation));
    assert!(!controller.is_progressing().await);

    tokio::time::sleep(Duration::from_secs(30)).await;

    let state = controller.current();
    assert_eq!(state.current_event, RideEvent::PickupConfirmation);
    assert_eq!(state.progress.current_step, 2);
    let telemetry = controller.telemetry().await;
    assert_eq!(telemetry.entries_into(RideEvent::PickupConfirmation), 1);
}

#[tokio::test(start_paused = true)]
async fn reset_from_idle_is_illegal_and_from_trip_ended_clears_everything() {
    let controller = fast_controller();
    assert_eq!(
        controller.reset().await,
        Err(LifecycleError::IllegalTransition {
            from: RideEvent::Idle,
            command: RideCommand::Reset,
        })
    );

    let mut stream = controller.subscribe();
    controller.offer_ride().await.expect("offer");
    controller.advance().await.expect("accept");
    controller.advance().await.expect("get to pickup");
    assert!(wait_for_event(&mut stream, RideEvent::PickupConfirmation).await);
    controller.confirm_pickup().await.expect("confirm");
    assert!(wait_for_event(&mut stream, RideEvent::TripCompleted).await);
    controller.advance().await.expect("end");

    assert_eq!(controller.reset().await, Ok(RideEvent::Idle));
    assert_eq!(*controller.current(), RideState::idle());
}

#[test]
fn invalid_config_is_rejected() {
    let config = LifecycleConfig::default().with_seats(ride_core::config::SeatConfig {
        initial_available: 6,
        max_available: 4,
    });
    assert!(matches!(
        RideLifecycleController::with_config(config),
        Err(LifecycleError::Config(_))
    ));
}
