//! Ride state snapshot: the single source of truth published to observers.
//!
//! A [RideState] is never patched from the outside. The controller builds the next value
//! inside its private world and publishes a full clone through the store.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of the single active ride session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RideEvent {
    #[default]
    Idle,
    OfferRideAvailable,
    PassengersAccepted,
    GetToPickup,
    PickupConfirmation,
    HeadingToDropoff,
    TripCompleted,
    TripEnded,
}

impl RideEvent {
    /// Legs driven by the timed-progression task rather than a caller.
    pub fn is_timed_leg(self) -> bool {
        matches!(self, RideEvent::GetToPickup | RideEvent::HeadingToDropoff)
    }

    /// Earnings exist only once the trip has completed.
    pub fn has_earnings(self) -> bool {
        matches!(self, RideEvent::TripCompleted | RideEvent::TripEnded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PassengerStatus {
    #[default]
    Pending,
    Accepted,
    PickedUp,
    DroppedOff,
    NoShow,
}

impl PassengerStatus {
    /// Position along the forward chain. `NoShow` sits beside `PickedUp` and never moves on.
    pub fn rank(self) -> u8 {
        match self {
            PassengerStatus::Pending => 0,
            PassengerStatus::Accepted => 1,
            PassengerStatus::PickedUp | PassengerStatus::NoShow => 2,
            PassengerStatus::DroppedOff => 3,
        }
    }

    /// Whether moving from `self` to `next` respects the forward-only status chain.
    pub fn can_become(self, next: PassengerStatus) -> bool {
        if self == next {
            return true;
        }
        match (self, next) {
            (PassengerStatus::NoShow, _) | (PassengerStatus::DroppedOff, _) => false,
            (PassengerStatus::Accepted, PassengerStatus::NoShow) => true,
            (_, PassengerStatus::NoShow) => false,
            (PassengerStatus::PickedUp, PassengerStatus::DroppedOff) => true,
            (from, to) => to.rank() == from.rank() + 1 && to != PassengerStatus::DroppedOff,
        }
    }
}

/// WGS84 coordinate pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Straight-line interpolation; `fraction` is clamped to `[0, 1]`.
    pub fn lerp(self, to: Coordinates, fraction: f64) -> Coordinates {
        if fraction >= 1.0 {
            return to;
        }
        if fraction <= 0.0 {
            return self;
        }
        Coordinates {
            lat: self.lat + (to.lat - self.lat) * fraction,
            lng: self.lng + (to.lng - self.lng) * fraction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub coordinates: Coordinates,
    pub address: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub rating: f32,
    pub vehicle_id: String,
    pub current_location: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub kind: String,
    pub license_plate: String,
    pub current_location: Coordinates,
    pub available_seats: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passenger {
    pub id: String,
    pub name: String,
    pub initials: String,
    pub rating: f32,
    pub pickup_location: Location,
    pub drop_off_location: Location,
    pub status: PassengerStatus,
}

/// Route fixed at offer time; waypoints are supplied, never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub start_location: Location,
    pub end_location: Location,
    pub waypoints: Vec<Location>,
    /// Estimated duration in minutes.
    pub estimated_duration_min: u32,
    /// Estimated distance in kilometers.
    pub estimated_distance_km: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideProgress {
    pub current_step: u32,
    pub total_steps: u32,
    /// Fraction complete in `[0, 1]`.
    pub progress_percentage: f32,
    /// Seconds.
    pub time_remaining: u32,
    /// Kilometers.
    pub distance_remaining: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideEarnings {
    pub base_amount: f64,
    pub bonus: f64,
    pub commission: f64,
    pub currency: String,
    /// Kilograms of CO2 avoided by sharing the ride.
    pub carbon_emission_avoided: f64,
}

impl RideEarnings {
    /// May be negative when commission exceeds base plus bonus.
    pub fn total(&self) -> f64 {
        self.base_amount + self.bonus - self.commission
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Resource)]
#[serde(rename_all = "camelCase")]
pub struct RideState {
    pub current_event: RideEvent,
    pub driver: Option<Driver>,
    pub vehicle: Option<Vehicle>,
    pub passengers: Vec<Passenger>,
    pub route: Option<Route>,
    pub progress: RideProgress,
    pub earnings: Option<RideEarnings>,
    pub is_simulating: bool,
}

impl RideState {
    /// The state every session starts from and returns to on reset.
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn passenger(&self, id: &str) -> Option<&Passenger> {
        self.passengers.iter().find(|p| p.id == id)
    }

    pub fn passengers_with(&self, status: PassengerStatus) -> impl Iterator<Item = &Passenger> {
        self.passengers.iter().filter(move |p| p.status == status)
    }

    pub fn is_active(&self) -> bool {
        self.current_event != RideEvent::Idle
    }

    /// Driver and vehicle always travel together.
    pub fn move_vehicle_to(&mut self, position: Coordinates) {
        if let Some(driver) = self.driver.as_mut() {
            driver.current_location = position;
        }
        if let Some(vehicle) = self.vehicle.as_mut() {
            vehicle.current_location = position;
        }
    }
}
