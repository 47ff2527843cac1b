//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.
//! "Not found" is `Ok(None)` / `Ok(false)`, never an error.

use crate::domain::entities::{Catway, NewCatway, NewReservation, Reservation};
use crate::domain::value_objects::{CatwayId, CatwayNumber, ReservationId, StayPeriod};
use crate::error::BookingResult;

/// Catway repository trait
#[trait_variant::make(CatwayRepository: Send)]
pub trait LocalCatwayRepository {
    async fn find_by_id(&self, id: &CatwayId) -> BookingResult<Option<Catway>>;

    async fn find_by_number(&self, number: CatwayNumber) -> BookingResult<Option<Catway>>;

    /// Catways whose number is not in `numbers`, ordered by number
    async fn list_excluding_numbers(&self, numbers: &[CatwayNumber]) -> BookingResult<Vec<Catway>>;

    /// All catways, ordered by number
    async fn list_all(&self) -> BookingResult<Vec<Catway>>;

    /// Insert; `AlreadyExists` if the number is taken
    async fn create(&self, catway: NewCatway) -> BookingResult<Catway>;

    /// Persist type/state changes; `false` if the catway is gone
    async fn update(&self, catway: &Catway) -> BookingResult<bool>;

    async fn delete_by_id(&self, id: &CatwayId) -> BookingResult<bool>;
}

/// Reservation selection; every set field must match
#[derive(Debug, Clone, Default)]
pub struct ReservationFilter {
    pub id: Option<ReservationId>,
    pub catway_number: Option<CatwayNumber>,
    /// Only reservations overlapping this period
    pub overlapping: Option<StayPeriod>,
}

impl ReservationFilter {
    pub fn on_catway(number: CatwayNumber) -> Self {
        Self {
            catway_number: Some(number),
            ..Default::default()
        }
    }

    pub fn matches(&self, reservation: &Reservation) -> bool {
        self.id.is_none_or(|id| reservation.id == id)
            && self
                .catway_number
                .is_none_or(|n| reservation.catway_number == n)
            && self
                .overlapping
                .is_none_or(|p| reservation.period.overlaps(&p))
    }
}

/// Reservation repository trait
#[trait_variant::make(ReservationRepository: Send)]
pub trait LocalReservationRepository {
    /// Matching reservations ordered by check-in
    async fn find(&self, filter: &ReservationFilter) -> BookingResult<Vec<Reservation>>;

    async fn find_one(&self, filter: &ReservationFilter) -> BookingResult<Option<Reservation>>;

    async fn create(&self, reservation: NewReservation) -> BookingResult<Reservation>;

    async fn delete_by_id(&self, id: &ReservationId) -> BookingResult<bool>;

    /// Delete every reservation on a catway, returning how many went
    async fn delete_by_catway(&self, number: CatwayNumber) -> BookingResult<u64>;

    /// Distinct catway numbers among matching reservations
    async fn distinct_numbers(&self, filter: &ReservationFilter) -> BookingResult<Vec<CatwayNumber>>;
}
