//! Shared handler state

use std::sync::Arc;

use crate::application::config::BookingConfig;
use crate::application::lock::CatwayLocks;
use crate::domain::repository::{CatwayRepository, ReservationRepository};

/// Shared state for booking handlers
///
/// The lock registry lives here so every request in the process shares it.
pub struct BookingState<R>
where
    R: CatwayRepository + ReservationRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub locks: Arc<CatwayLocks>,
    pub config: Arc<BookingConfig>,
}

impl<R> BookingState<R>
where
    R: CatwayRepository + ReservationRepository + Send + Sync + 'static,
{
    pub fn new(repo: R, config: BookingConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            locks: Arc::new(CatwayLocks::new()),
            config: Arc::new(config),
        }
    }
}

// Manual impl: cloning the state only clones the Arcs
impl<R> Clone for BookingState<R>
where
    R: CatwayRepository + ReservationRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            locks: self.locks.clone(),
            config: self.config.clone(),
        }
    }
}
