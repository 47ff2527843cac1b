//! Application Configuration
//!
//! Booking behaviour that differs between deployments. Built once at
//! startup and shared behind an `Arc`.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::repository::ReservationFilter;
use crate::domain::value_objects::{CatwayNumber, StayPeriod};
use crate::error::BookingError;

/// What counts as a clash when booking a catway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AvailabilityPolicy {
    /// Half-open interval overlap on the same catway
    #[default]
    IntervalOverlap,
    /// Any existing reservation blocks the whole catway (legacy behaviour)
    ///
    /// Only the in-process catway lock enforces this rule. The database
    /// exclusion constraint covers interval overlap alone, so several
    /// server processes sharing one database can each book a catway once
    /// for disjoint periods.
    WholeCatway,
}

impl AvailabilityPolicy {
    /// Filter selecting the reservations that clash with `period` on `number`
    pub fn conflicts(&self, number: CatwayNumber, period: StayPeriod) -> ReservationFilter {
        match self {
            AvailabilityPolicy::IntervalOverlap => ReservationFilter {
                overlapping: Some(period),
                ..ReservationFilter::on_catway(number)
            },
            AvailabilityPolicy::WholeCatway => ReservationFilter::on_catway(number),
        }
    }

    /// Filter selecting reservations that make a catway unavailable for `window`
    pub fn occupying(&self, window: Option<StayPeriod>) -> ReservationFilter {
        match (self, window) {
            (AvailabilityPolicy::IntervalOverlap, Some(window)) => ReservationFilter {
                overlapping: Some(window),
                ..Default::default()
            },
            _ => ReservationFilter::default(),
        }
    }
}

impl FromStr for AvailabilityPolicy {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "interval" | "interval-overlap" => Ok(AvailabilityPolicy::IntervalOverlap),
            "whole-catway" | "whole" => Ok(AvailabilityPolicy::WholeCatway),
            other => Err(BookingError::InvalidInput(format!(
                "Unknown availability policy '{other}'"
            ))),
        }
    }
}

impl fmt::Display for AvailabilityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AvailabilityPolicy::IntervalOverlap => "interval",
            AvailabilityPolicy::WholeCatway => "whole-catway",
        })
    }
}

/// What happens to reservations when their catway is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatwayDeletionPolicy {
    /// Delete the catway, keep its reservations
    #[default]
    Retain,
    /// Refuse with `Conflict` while reservations reference the catway
    Block,
    /// Delete the catway's reservations first
    Cascade,
}

impl FromStr for CatwayDeletionPolicy {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retain" => Ok(CatwayDeletionPolicy::Retain),
            "block" => Ok(CatwayDeletionPolicy::Block),
            "cascade" => Ok(CatwayDeletionPolicy::Cascade),
            other => Err(BookingError::InvalidInput(format!(
                "Unknown catway deletion policy '{other}'"
            ))),
        }
    }
}

impl fmt::Display for CatwayDeletionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CatwayDeletionPolicy::Retain => "retain",
            CatwayDeletionPolicy::Block => "block",
            CatwayDeletionPolicy::Cascade => "cascade",
        })
    }
}

/// Booking application configuration
#[derive(Debug, Clone)]
pub struct BookingConfig {
    pub availability: AvailabilityPolicy,
    pub deletion: CatwayDeletionPolicy,
    /// Upper bound for every repository call and for waiting on a catway lock
    pub storage_timeout: Duration,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            availability: AvailabilityPolicy::IntervalOverlap,
            deletion: CatwayDeletionPolicy::Retain,
            storage_timeout: Duration::from_secs(5),
        }
    }
}
