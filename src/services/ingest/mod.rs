//! Location ingest service.

use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde_json::Value;
use tracing::{debug, warn};

use crate::records::NewLocation;
use crate::services::ApiError;
use crate::storage::LocationStore;

/// Client identity recorded for payloads that name none.
const DEFAULT_USER_ID: &str = "user1";

/// Timestamp formats accepted from clients, most specific first.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Location ingest service.
///
/// Parses one untrusted JSON payload into a validated record and appends
/// it through the store. Field handling is deliberately lenient: a body
/// that is missing, not a JSON object, or an empty object is rejected,
/// everything else is defaulted field by field.
pub struct IngestService {
    store: Arc<dyn LocationStore>,
}

impl IngestService {
    /// Create a new ingest service.
    pub fn new(store: Arc<dyn LocationStore>) -> Self {
        Self { store }
    }

    /// Parse, normalize, and append one position payload.
    ///
    /// The assigned id is logged, not returned: callers only learn
    /// success or failure.
    pub async fn handle(&self, body: &[u8]) -> Result<(), ApiError> {
        let payload: Value = serde_json::from_slice(body).map_err(|_| ApiError::MalformedInput)?;
        let fields = payload.as_object().ok_or(ApiError::MalformedInput)?;
        if fields.is_empty() {
            return Err(ApiError::MalformedInput);
        }

        let user_id = fields
            .get("user_id")
            .and_then(Value::as_str)
            .filter(|user_id| !user_id.is_empty())
            .unwrap_or(DEFAULT_USER_ID)
            .to_string();
        let latitude = fields.get("lat").and_then(Value::as_f64);
        let longitude = fields.get("lng").and_then(Value::as_f64);
        let timestamp = normalize_timestamp(fields.get("timestamp").and_then(Value::as_str));

        let location = NewLocation {
            user_id,
            latitude,
            longitude,
            timestamp,
        };

        let id = self.store.append(&location).await?;
        debug!(user_id = %location.user_id, id = id, "Stored location record");

        Ok(())
    }
}

/// Normalize a client timestamp to canonical form.
///
/// Strips trailing `Z` characters, parses the remainder as a naive
/// ISO-8601 timestamp, and re-renders it canonically. An absent or
/// unparseable timestamp falls back to the current local wall-clock time.
fn normalize_timestamp(raw: Option<&str>) -> String {
    match raw {
        Some(value) => {
            let trimmed = value.trim_end_matches('Z');
            match parse_naive(trimmed) {
                Some(parsed) => render_canonical(&parsed),
                None => {
                    warn!(timestamp = %value, "Unparseable timestamp, using current time");
                    render_canonical(&Local::now().naive_local())
                }
            }
        }
        None => render_canonical(&Local::now().naive_local()),
    }
}

fn parse_naive(value: &str) -> Option<NaiveDateTime> {
    for format in TIMESTAMP_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed);
        }
    }
    // A bare date promotes to midnight.
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

/// Canonical rendering: second precision, fractional part only when
/// non-zero, no timezone suffix.
fn render_canonical(timestamp: &NaiveDateTime) -> String {
    if timestamp.nanosecond() == 0 {
        timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        timestamp.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
    }
}
