//! Catway Administration Use Cases
//!
//! Create, read, update and delete berths. Reservations reference catways
//! by number, so deletion follows the configured [`CatwayDeletionPolicy`].

use std::sync::Arc;

use kernel::caller::Caller;
use kernel::deadline::within;

use crate::application::config::{BookingConfig, CatwayDeletionPolicy};
use crate::application::lock::CatwayLocks;
use crate::domain::entities::{Catway, CatwayChanges, NewCatway};
use crate::domain::repository::{CatwayRepository, ReservationFilter, ReservationRepository};
use crate::domain::value_objects::{CatwayId, CatwayNumber, CatwayType};
use crate::error::{BookingError, BookingResult};

/// Raw catway creation input
#[derive(Debug)]
pub struct CreateCatwayInput {
    pub catway_number: i32,
    pub catway_type: String,
    pub catway_state: Option<String>,
}

/// Raw catway update; omitted or blank fields are left unchanged
#[derive(Debug, Default)]
pub struct CatwayUpdateInput {
    pub catway_type: Option<String>,
    pub catway_state: Option<String>,
}

/// Catway administration use case
pub struct CatwayAdminUseCase<R>
where
    R: CatwayRepository + ReservationRepository,
{
    repo: Arc<R>,
    locks: Arc<CatwayLocks>,
    config: Arc<BookingConfig>,
}

impl<R> CatwayAdminUseCase<R>
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

    pub async fn create(&self, caller: &Caller, input: CreateCatwayInput) -> BookingResult<Catway> {
        let catway_number = CatwayNumber::new(input.catway_number)?;
        let catway_type: CatwayType = input.catway_type.parse()?;
        let catway_state = non_blank(input.catway_state);

        let existing = within(
            self.config.storage_timeout,
            "catways.find_by_number",
            CatwayRepository::find_by_number(self.repo.as_ref(), catway_number),
        )
        .await?;
        if existing.is_some() {
            return Err(BookingError::AlreadyExists);
        }

        // The store re-checks uniqueness on insert
        let catway = within(
            self.config.storage_timeout,
            "catways.create",
            CatwayRepository::create(
                self.repo.as_ref(),
                NewCatway {
                    catway_number,
                    catway_type,
                    catway_state,
                },
            ),
        )
        .await?;

        tracing::info!(
            actor = %caller,
            catway_id = %catway.id,
            catway_number = %catway.catway_number,
            catway_type = %catway.catway_type,
            "Catway created"
        );

        Ok(catway)
    }

    pub async fn get(&self, id: &CatwayId) -> BookingResult<Catway> {
        self.load(id).await
    }

    /// All catways, ordered by number
    pub async fn list(&self) -> BookingResult<Vec<Catway>> {
        within(
            self.config.storage_timeout,
            "catways.list_all",
            self.repo.list_all(),
        )
        .await
    }

    /// Change the type and/or state; the number never changes
    pub async fn update(
        &self,
        caller: &Caller,
        id: &CatwayId,
        input: CatwayUpdateInput,
    ) -> BookingResult<Catway> {
        let changes = CatwayChanges {
            catway_type: non_blank(input.catway_type)
                .map(|raw| raw.parse::<CatwayType>())
                .transpose()?,
            catway_state: non_blank(input.catway_state),
        };

        let mut catway = self.load(id).await?;
        catway.apply(changes);

        let updated = within(
            self.config.storage_timeout,
            "catways.update",
            self.repo.update(&catway),
        )
        .await?;
        if !updated {
            return Err(BookingError::CatwayNotFound);
        }

        tracing::info!(
            actor = %caller,
            catway_id = %catway.id,
            catway_number = %catway.catway_number,
            "Catway updated"
        );

        Ok(catway)
    }

    pub async fn delete(&self, caller: &Caller, id: &CatwayId) -> BookingResult<()> {
        let catway = self.load(id).await?;
        let number = catway.catway_number;

        // Bookings on this catway re-check existence under the same lock
        let _guard = self
            .locks
            .acquire(number, self.config.storage_timeout)
            .await?;

        let removed_reservations = match self.config.deletion {
            CatwayDeletionPolicy::Retain => {
                self.delete_record(id).await?;
                0
            }
            CatwayDeletionPolicy::Block => {
                let blocking = within(
                    self.config.storage_timeout,
                    "reservations.find_one",
                    self.repo.find_one(&ReservationFilter::on_catway(number)),
                )
                .await?;
                if blocking.is_some() {
                    return Err(BookingError::Conflict(format!(
                        "Catway {number} still has reservations"
                    )));
                }

                self.delete_record(id).await?;
                0
            }
            CatwayDeletionPolicy::Cascade => {
                let removed = within(
                    self.config.storage_timeout,
                    "reservations.delete_by_catway",
                    self.repo.delete_by_catway(number),
                )
                .await?;

                self.delete_record(id).await?;
                removed
            }
        };

        tracing::info!(
            actor = %caller,
            catway_id = %id,
            catway_number = %number,
            policy = %self.config.deletion,
            removed_reservations,
            "Catway deleted"
        );

        Ok(())
    }

    async fn delete_record(&self, id: &CatwayId) -> BookingResult<()> {
        let deleted = within(
            self.config.storage_timeout,
            "catways.delete",
            CatwayRepository::delete_by_id(self.repo.as_ref(), id),
        )
        .await?;

        if deleted {
            Ok(())
        } else {
            Err(BookingError::CatwayNotFound)
        }
    }

    async fn load(&self, id: &CatwayId) -> BookingResult<Catway> {
        within(
            self.config.storage_timeout,
            "catways.find_by_id",
            self.repo.find_by_id(id),
        )
        .await?
        .ok_or(BookingError::CatwayNotFound)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
