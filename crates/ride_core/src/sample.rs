//! Fixed sample data handed out at offer time. Nothing here is random so runs are repeatable.

use crate::state::{Coordinates, Driver, Location, Passenger, PassengerStatus, Route, Vehicle};

pub const DRIVER_START: Coordinates = Coordinates::new(6.5244, 3.3792);
pub const PICKUP_POINT: Coordinates = Coordinates::new(6.5378, 3.3516);
pub const FIRST_DROP_OFF: Coordinates = Coordinates::new(6.5287, 3.3478);
pub const FINAL_DROP_OFF: Coordinates = Coordinates::new(6.5198, 3.3441);

pub const DRIVER_ID: &str = "driver_001";
pub const VEHICLE_ID: &str = "vehicle_001";
pub const FIRST_PASSENGER_ID: &str = "passenger_001";
pub const SECOND_PASSENGER_ID: &str = "passenger_002";

fn location(coordinates: Coordinates, address: &str, name: Option<&str>) -> Location {
    Location {
        coordinates,
        address: address.to_string(),
        name: name.map(str::to_string),
    }
}

pub fn sample_driver() -> Driver {
    Driver {
        id: DRIVER_ID.to_string(),
        name: "Current Driver".to_string(),
        rating: 4.8,
        vehicle_id: VEHICLE_ID.to_string(),
        current_location: DRIVER_START,
    }
}

pub fn sample_vehicle(available_seats: u32) -> Vehicle {
    Vehicle {
        id: VEHICLE_ID.to_string(),
        kind: "Sedan".to_string(),
        license_plate: "ABC-123-XY".to_string(),
        current_location: DRIVER_START,
        available_seats,
    }
}

/// Two pending passengers sharing a pickup, each with its own drop-off.
pub fn sample_passengers() -> Vec<Passenger> {
    let pickup = location(
        PICKUP_POINT,
        "Ladipo Oluwole Street",
        Some("Ladipo Oluwole Street"),
    );
    vec![
        Passenger {
            id: FIRST_PASSENGER_ID.to_string(),
            name: "Darrell Stewart".to_string(),
            initials: "DS".to_string(),
            rating: 4.7,
            pickup_location: pickup.clone(),
            drop_off_location: location(FIRST_DROP_OFF, "Aromire Street", Some("Aromire Street")),
            status: PassengerStatus::Pending,
        },
        Passenger {
            id: SECOND_PASSENGER_ID.to_string(),
            name: "Hinata Chukwu".to_string(),
            initials: "HC".to_string(),
            rating: 4.7,
            pickup_location: pickup,
            drop_off_location: location(FINAL_DROP_OFF, "Community Road", Some("Community Road")),
            status: PassengerStatus::Pending,
        },
    ]
}

pub fn sample_route() -> Route {
    Route {
        start_location: location(DRIVER_START, "Current Location", Some("Driver Location")),
        end_location: location(FINAL_DROP_OFF, "Community Road", Some("Final Destination")),
        waypoints: vec![
            location(PICKUP_POINT, "Ladipo Oluwole Street", Some("Pickup Point")),
            location(
                FIRST_DROP_OFF,
                "Aromire Street",
                Some("First Drop-off (Darrell Stewart)"),
            ),
        ],
        estimated_duration_min: 15,
        estimated_distance_km: 5.3,
    }
}
