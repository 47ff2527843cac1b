//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::domain::value_objects::StayPeriod;
use crate::error::{BookingError, BookingResult};

// ============================================================================
// Catways
// ============================================================================

/// Create catway request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCatwayRequest {
    pub catway_number: i32,
    pub catway_type: String,
    #[serde(default)]
    pub catway_state: Option<String>,
}

/// Update catway request; the number cannot be changed
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCatwayRequest {
    #[serde(default)]
    pub catway_type: Option<String>,
    #[serde(default)]
    pub catway_state: Option<String>,
}

/// `GET /catways/available?from=..&to=..`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailabilityQuery {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

impl AvailabilityQuery {
    /// Both bounds or neither
    pub fn window(&self) -> BookingResult<Option<StayPeriod>> {
        match (self.from.as_deref(), self.to.as_deref()) {
            (None, None) => Ok(None),
            (Some(from), Some(to)) => {
                StayPeriod::new(parse_instant(from)?, parse_instant(to)?).map(Some)
            }
            _ => Err(BookingError::InvalidInput(
                "Both 'from' and 'to' are required for a window".into(),
            )),
        }
    }
}

// ============================================================================
// Reservations
// ============================================================================

/// Create reservation request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub client_name: String,
    pub boat_name: String,
    pub check_in: String,
    pub check_out: String,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Parse an RFC 3339 timestamp or a plain `YYYY-MM-DD` (midnight UTC)
pub fn parse_instant(raw: &str) -> BookingResult<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| BookingError::InvalidInput(format!("Invalid date: '{raw}'")))
}
