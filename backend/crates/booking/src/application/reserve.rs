//! Reserve Use Case
//!
//! Book a catway for a stay period. The overlap check and the insert run
//! under the catway's lock, so two racing requests cannot both pass the
//! check. The PostgreSQL schema enforces the same rule across processes.

use std::sync::Arc;

use kernel::caller::Caller;
use kernel::deadline::within;

use crate::application::config::BookingConfig;
use crate::application::lock::CatwayLocks;
use crate::domain::entities::{NewReservation, Reservation};
use crate::domain::repository::{CatwayRepository, ReservationRepository};
use crate::domain::value_objects::{CatwayId, StayPeriod};
use crate::error::{BookingError, BookingResult};

/// Reservation request, already parsed into domain dates
#[derive(Debug, Clone)]
pub struct ReserveInput {
    pub catway_id: CatwayId,
    pub client_name: String,
    pub boat_name: String,
    pub check_in: chrono::DateTime<chrono::Utc>,
    pub check_out: chrono::DateTime<chrono::Utc>,
}

/// Reserve use case
pub struct ReserveUseCase<R>
where
    R: CatwayRepository + ReservationRepository,
{
    repo: Arc<R>,
    locks: Arc<CatwayLocks>,
    config: Arc<BookingConfig>,
}

impl<R> ReserveUseCase<R>
where
    R: CatwayRepository + ReservationRepository,
{
    pub fn new(repo: Arc<R>, locks: Arc<CatwayLocks>, config: Arc<BookingConfig>) -> Self {
        Self {
            repo,
            locks,
            config,
        }
    }

    pub async fn execute(&self, caller: &Caller, input: ReserveInput) -> BookingResult<Reservation> {
        let period = StayPeriod::new(input.check_in, input.check_out)?;
        let client_name = required("Client name", input.client_name)?;
        let boat_name = required("Boat name", input.boat_name)?;

        let catway = within(
            self.config.storage_timeout,
            "catways.find_by_id",
            CatwayRepository::find_by_id(self.repo.as_ref(), &input.catway_id),
        )
        .await?
        .ok_or(BookingError::CatwayNotFound)?;
        let number = catway.catway_number;

        let _guard = self
            .locks
            .acquire(number, self.config.storage_timeout)
            .await?;

        // The catway may have been deleted while we waited
        within(
            self.config.storage_timeout,
            "catways.find_by_number",
            self.repo.find_by_number(number),
        )
        .await?
        .ok_or(BookingError::CatwayNotFound)?;

        let clash = within(
            self.config.storage_timeout,
            "reservations.find_one",
            self.repo
                .find_one(&self.config.availability.conflicts(number, period)),
        )
        .await?;
        if let Some(existing) = clash {
            tracing::warn!(
                actor = %caller,
                catway_number = %number,
                existing_id = %existing.id,
                policy = %self.config.availability,
                "Reservation rejected: catway already booked"
            );
            return Err(BookingError::overlap());
        }

        let reservation = within(
            self.config.storage_timeout,
            "reservations.create",
            ReservationRepository::create(
                self.repo.as_ref(),
                NewReservation {
                    catway_number: number,
                    client_name,
                    boat_name,
                    period,
                },
            ),
        )
        .await?;

        tracing::info!(
            actor = %caller,
            reservation_id = %reservation.id,
            catway_number = %number,
            check_in = %period.check_in(),
            check_out = %period.check_out(),
            "Reservation created"
        );

        Ok(reservation)
    }
}

fn required(field: &str, value: String) -> BookingResult<String> {
    let value = value.trim();
    if value.is_empty() {
        Err(BookingError::InvalidInput(format!("{field} is required")))
    } else {
        Ok(value.to_string())
    }
}
