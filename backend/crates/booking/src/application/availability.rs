//! Availability Use Case
//!
//! A catway is available when no reservation occupies it. Without a window
//! every reserved number is excluded; with a window, the policy decides.

use std::sync::Arc;

use kernel::deadline::within;

use crate::application::config::BookingConfig;
use crate::domain::entities::Catway;
use crate::domain::repository::{CatwayRepository, ReservationRepository};
use crate::domain::value_objects::StayPeriod;
use crate::error::BookingResult;

/// Availability use case
pub struct AvailabilityUseCase<R>
where
    R: CatwayRepository + ReservationRepository,
{
    repo: Arc<R>,
    config: Arc<BookingConfig>,
}

impl<R> AvailabilityUseCase<R>
where
    R: CatwayRepository + ReservationRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<BookingConfig>) -> Self {
        Self { repo, config }
    }

    /// Catways free for `window` (or free of any reservation), ordered by number
    pub async fn list_available(&self, window: Option<StayPeriod>) -> BookingResult<Vec<Catway>> {
        let filter = self.config.availability.occupying(window);

        let occupied = within(
            self.config.storage_timeout,
            "reservations.distinct_numbers",
            self.repo.distinct_numbers(&filter),
        )
        .await?;

        within(
            self.config.storage_timeout,
            "catways.list_excluding_numbers",
            self.repo.list_excluding_numbers(&occupied),
        )
        .await
    }
}
