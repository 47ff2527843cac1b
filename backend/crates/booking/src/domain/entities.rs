//! Domain Entities

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::value_objects::{CatwayId, CatwayNumber, CatwayType, ReservationId, StayPeriod};

/// A numbered, typed berth
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catway {
    pub id: CatwayId,
    pub catway_number: CatwayNumber,
    pub catway_type: CatwayType,
    /// Free-text condition ("good", "broken plank", ...)
    pub catway_state: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Catway to be created
#[derive(Debug, Clone)]
pub struct NewCatway {
    pub catway_number: CatwayNumber,
    pub catway_type: CatwayType,
    pub catway_state: Option<String>,
}

impl NewCatway {
    pub fn into_catway(self) -> Catway {
        Catway {
            id: CatwayId::new(),
            catway_number: self.catway_number,
            catway_type: self.catway_type,
            catway_state: self.catway_state,
            created_at: Utc::now(),
        }
    }
}

/// Catway changes; the number is immutable
#[derive(Debug, Clone, Default)]
pub struct CatwayChanges {
    pub catway_type: Option<CatwayType>,
    pub catway_state: Option<String>,
}

impl Catway {
    pub fn apply(&mut self, changes: CatwayChanges) {
        if let Some(catway_type) = changes.catway_type {
            self.catway_type = catway_type;
        }
        if let Some(state) = changes.catway_state {
            self.catway_state = Some(state);
        }
    }
}

/// An exclusive claim on a catway for a stay period
///
/// Never mutated in place: cancel and re-create instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: ReservationId,
    pub catway_number: CatwayNumber,
    pub client_name: String,
    pub boat_name: String,
    #[serde(flatten)]
    pub period: StayPeriod,
    pub created_at: DateTime<Utc>,
}

/// Reservation to be created
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub catway_number: CatwayNumber,
    pub client_name: String,
    pub boat_name: String,
    pub period: StayPeriod,
}

impl NewReservation {
    pub fn into_reservation(self) -> Reservation {
        Reservation {
            id: ReservationId::new(),
            catway_number: self.catway_number,
            client_name: self.client_name,
            boat_name: self.boat_name,
            period: self.period,
            created_at: Utc::now(),
        }
    }
}
