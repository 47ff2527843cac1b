//! In-Memory Booking Store
//!
//! Process-local catways and reservations, used when no database is
//! configured and as the test fixture. Catway number uniqueness is checked
//! under the write lock; reservation overlap is left to the engine's
//! catway locks, exactly as for a plain document store.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entities::{Catway, NewCatway, NewReservation, Reservation};
use crate::domain::repository::{CatwayRepository, ReservationFilter, ReservationRepository};
use crate::domain::value_objects::{CatwayId, CatwayNumber, ReservationId};
use crate::error::{BookingError, BookingResult};

#[derive(Clone, Default)]
pub struct InMemoryBookingStore {
    catways: Arc<RwLock<HashMap<CatwayId, Catway>>>,
    reservations: Arc<RwLock<HashMap<ReservationId, Reservation>>>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn reservation_count(&self) -> usize {
        self.reservations.read().await.len()
    }
}

fn by_number(mut catways: Vec<Catway>) -> Vec<Catway> {
    catways.sort_by_key(|c| c.catway_number);
    catways
}

impl CatwayRepository for InMemoryBookingStore {
    async fn find_by_id(&self, id: &CatwayId) -> BookingResult<Option<Catway>> {
        Ok(self.catways.read().await.get(id).cloned())
    }

    async fn find_by_number(&self, number: CatwayNumber) -> BookingResult<Option<Catway>> {
        let catways = self.catways.read().await;
        Ok(catways
            .values()
            .find(|c| c.catway_number == number)
            .cloned())
    }

    async fn list_excluding_numbers(&self, numbers: &[CatwayNumber]) -> BookingResult<Vec<Catway>> {
        let catways = self.catways.read().await;
        Ok(by_number(
            catways
                .values()
                .filter(|c| !numbers.contains(&c.catway_number))
                .cloned()
                .collect(),
        ))
    }

    async fn list_all(&self) -> BookingResult<Vec<Catway>> {
        let catways = self.catways.read().await;
        Ok(by_number(catways.values().cloned().collect()))
    }

    async fn create(&self, catway: NewCatway) -> BookingResult<Catway> {
        let mut catways = self.catways.write().await;

        if catways
            .values()
            .any(|c| c.catway_number == catway.catway_number)
        {
            return Err(BookingError::AlreadyExists);
        }

        let catway = catway.into_catway();
        catways.insert(catway.id, catway.clone());
        Ok(catway)
    }

    async fn update(&self, catway: &Catway) -> BookingResult<bool> {
        let mut catways = self.catways.write().await;
        match catways.get_mut(&catway.id) {
            Some(stored) => {
                stored.catway_type = catway.catway_type;
                stored.catway_state = catway.catway_state.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: &CatwayId) -> BookingResult<bool> {
        Ok(self.catways.write().await.remove(id).is_some())
    }
}

impl ReservationRepository for InMemoryBookingStore {
    async fn find(&self, filter: &ReservationFilter) -> BookingResult<Vec<Reservation>> {
        let reservations = self.reservations.read().await;
        let mut found: Vec<Reservation> = reservations
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        found.sort_by_key(|r| (r.period.check_in(), r.catway_number));
        Ok(found)
    }

    async fn find_one(&self, filter: &ReservationFilter) -> BookingResult<Option<Reservation>> {
        let reservations = self.reservations.read().await;
        Ok(reservations.values().find(|r| filter.matches(r)).cloned())
    }

    async fn create(&self, reservation: NewReservation) -> BookingResult<Reservation> {
        let reservation = reservation.into_reservation();
        self.reservations
            .write()
            .await
            .insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn delete_by_id(&self, id: &ReservationId) -> BookingResult<bool> {
        Ok(self.reservations.write().await.remove(id).is_some())
    }

    async fn delete_by_catway(&self, number: CatwayNumber) -> BookingResult<u64> {
        let mut reservations = self.reservations.write().await;
        let before = reservations.len();
        reservations.retain(|_, r| r.catway_number != number);
        Ok((before - reservations.len()) as u64)
    }

    async fn distinct_numbers(&self, filter: &ReservationFilter) -> BookingResult<Vec<CatwayNumber>> {
        let reservations = self.reservations.read().await;
        let numbers: BTreeSet<CatwayNumber> = reservations
            .values()
            .filter(|r| filter.matches(r))
            .map(|r| r.catway_number)
            .collect();
        Ok(numbers.into_iter().collect())
    }
}
