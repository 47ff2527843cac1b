//! Cancel Reservation Use Case
//!
//! A reservation is only cancelled through the catway it belongs to: the
//! id alone is not enough.

use std::sync::Arc;

use kernel::caller::Caller;
use kernel::deadline::within;

use crate::application::config::BookingConfig;
use crate::application::lock::CatwayLocks;
use crate::domain::repository::{ReservationFilter, ReservationRepository};
use crate::domain::value_objects::{CatwayNumber, ReservationId};
use crate::error::{BookingError, BookingResult};

/// Cancel reservation use case
pub struct CancelReservationUseCase<R>
where
    R: ReservationRepository,
{
    repo: Arc<R>,
    locks: Arc<CatwayLocks>,
    config: Arc<BookingConfig>,
}

impl<R> CancelReservationUseCase<R>
where
    R: ReservationRepository,
{
    pub fn new(repo: Arc<R>, locks: Arc<CatwayLocks>, config: Arc<BookingConfig>) -> Self {
        Self {
            repo,
            locks,
            config,
        }
    }

    pub async fn execute(
        &self,
        caller: &Caller,
        number: CatwayNumber,
        id: &ReservationId,
    ) -> BookingResult<()> {
        let filter = ReservationFilter {
            id: Some(*id),
            ..ReservationFilter::on_catway(number)
        };
        let reservation = within(
            self.config.storage_timeout,
            "reservations.find_one",
            self.repo.find_one(&filter),
        )
        .await?
        .ok_or(BookingError::ReservationNotFound)?;

        // Only catways with a matching reservation get a lock slot
        let _guard = self
            .locks
            .acquire(number, self.config.storage_timeout)
            .await?;

        let deleted = within(
            self.config.storage_timeout,
            "reservations.delete",
            self.repo.delete_by_id(&reservation.id),
        )
        .await?;
        if !deleted {
            return Err(BookingError::ReservationNotFound);
        }

        tracing::info!(
            actor = %caller,
            reservation_id = %reservation.id,
            catway_number = %number,
            "Reservation cancelled"
        );

        Ok(())
    }
}
