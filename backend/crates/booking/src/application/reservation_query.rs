//! Reservation Queries

use std::sync::Arc;

use kernel::deadline::within;

use crate::application::config::BookingConfig;
use crate::domain::entities::Reservation;
use crate::domain::repository::{CatwayRepository, ReservationFilter, ReservationRepository};
use crate::domain::value_objects::{CatwayId, CatwayNumber, ReservationId};
use crate::error::{BookingError, BookingResult};

/// Read-only reservation use case
pub struct ReservationQueryUseCase<R>
where
    R: CatwayRepository + ReservationRepository,
{
    repo: Arc<R>,
    config: Arc<BookingConfig>,
}

impl<R> ReservationQueryUseCase<R>
where
    R: CatwayRepository + ReservationRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<BookingConfig>) -> Self {
        Self { repo, config }
    }

    /// One reservation, only if it belongs to catway `number`
    pub async fn get(&self, number: CatwayNumber, id: &ReservationId) -> BookingResult<Reservation> {
        let filter = ReservationFilter {
            id: Some(*id),
            ..ReservationFilter::on_catway(number)
        };

        within(
            self.config.storage_timeout,
            "reservations.find_one",
            self.repo.find_one(&filter),
        )
        .await?
        .ok_or(BookingError::ReservationNotFound)
    }

    /// Reservations of one catway, ordered by check-in
    pub async fn list_for_catway(&self, catway_id: &CatwayId) -> BookingResult<Vec<Reservation>> {
        let catway = within(
            self.config.storage_timeout,
            "catways.find_by_id",
            CatwayRepository::find_by_id(self.repo.as_ref(), catway_id),
        )
        .await?
        .ok_or(BookingError::CatwayNotFound)?;

        within(
            self.config.storage_timeout,
            "reservations.find",
            self.repo
                .find(&ReservationFilter::on_catway(catway.catway_number)),
        )
        .await
    }

    /// Every reservation across all catways
    pub async fn list_all(&self) -> BookingResult<Vec<Reservation>> {
        within(
            self.config.storage_timeout,
            "reservations.find",
            self.repo.find(&ReservationFilter::default()),
        )
        .await
    }
}
