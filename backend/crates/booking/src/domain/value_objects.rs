//! Domain Value Objects
//!
//! Immutable value types for the booking domain.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use kernel::id::Id;
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, BookingResult};

/// Marker for catway record IDs
pub struct CatwayMarker;
/// Marker for reservation record IDs
pub struct ReservationMarker;

/// Internal catway record identifier
pub type CatwayId = Id<CatwayMarker>;
/// Internal reservation record identifier
pub type ReservationId = Id<ReservationMarker>;

// ============================================================================
// Catway Number
// ============================================================================

/// Business number painted on the berth
///
/// Reservations reference catways by this number, never by record id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct CatwayNumber(i32);

impl CatwayNumber {
    pub fn new(number: i32) -> BookingResult<Self> {
        if number > 0 {
            Ok(Self(number))
        } else {
            Err(BookingError::InvalidInput(
                "Catway number must be a positive integer".into(),
            ))
        }
    }

    pub fn get(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for CatwayNumber {
    type Error = BookingError;

    fn try_from(n: i32) -> BookingResult<Self> {
        Self::new(n)
    }
}

impl From<CatwayNumber> for i32 {
    fn from(n: CatwayNumber) -> Self {
        n.0
    }
}

impl FromStr for CatwayNumber {
    type Err = BookingError;

    fn from_str(s: &str) -> BookingResult<Self> {
        let n = s
            .trim()
            .parse::<i32>()
            .map_err(|_| BookingError::InvalidInput(format!("Invalid catway number: {s}")))?;
        Self::new(n)
    }
}

impl fmt::Display for CatwayNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Catway Type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatwayType {
    Long,
    Short,
}

impl CatwayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatwayType::Long => "long",
            CatwayType::Short => "short",
        }
    }
}

impl FromStr for CatwayType {
    type Err = BookingError;

    fn from_str(s: &str) -> BookingResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "long" => Ok(CatwayType::Long),
            "short" => Ok(CatwayType::Short),
            other => Err(BookingError::InvalidInput(format!(
                "Catway type must be 'long' or 'short' (got '{other}')"
            ))),
        }
    }
}

impl fmt::Display for CatwayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Stay Period
// ============================================================================

/// Half-open stay interval `[check_in, check_out)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StayPeriod {
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
}

impl StayPeriod {
    /// Fails with `InvalidRange` unless `check_in < check_out`
    pub fn new(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> BookingResult<Self> {
        if check_in < check_out {
            Ok(Self {
                check_in,
                check_out,
            })
        } else {
            Err(BookingError::InvalidRange)
        }
    }

    pub fn check_in(&self) -> DateTime<Utc> {
        self.check_in
    }

    pub fn check_out(&self) -> DateTime<Utc> {
        self.check_out
    }

    /// Share at least one instant; touching boundaries do not overlap
    pub fn overlaps(&self, other: &StayPeriod) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }
}
