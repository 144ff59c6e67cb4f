pub mod get_to_pickup;
pub mod heading_to_dropoff;
pub mod offer_ride;
pub mod passengers_accepted;
pub mod pickup_confirmation;
pub mod progress_tick;
pub mod reset;
pub mod trip_completed;
pub mod trip_ended;
