//! Core record types shared across storage and services.

use serde::{Deserialize, Serialize};

/// A validated position record ready for appending.
///
/// Produced by the ingest service after parsing and normalization.
/// `user_id` is never empty; `timestamp` is already in canonical form.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub user_id: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timestamp: String,
}

/// A stored position record as returned by queries.
///
/// Serializes with the wire field names (`lat`/`lng`). Null coordinates
/// stay present as JSON null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: i64,
    #[serde(rename = "lat")]
    pub latitude: Option<f64>,
    #[serde(rename = "lng")]
    pub longitude: Option<f64>,
    pub timestamp: String,
}

/// Filter predicates for a location query.
///
/// All present predicates combine with AND. Timestamp bounds compare
/// against the stored canonical strings: `start`/`end` are inclusive,
/// `after_ts` and `after_id` are exclusive.
#[derive(Debug, Clone, Default)]
pub struct LocationFilter {
    pub start: Option<String>,
    pub end: Option<String>,
    pub after_ts: Option<String>,
    pub after_id: Option<i64>,
}

/// Pagination window applied after filtering.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub limit: u64,
    pub offset: u64,
}

/// A validated query against one client partition.
///
/// Results are always ordered by `id` ascending, which keeps `after_id`
/// polling gap-free and duplicate-free.
#[derive(Debug, Clone)]
pub struct LocationQuery {
    pub user_id: String,
    pub filter: LocationFilter,
    pub page: Option<Page>,
}

impl LocationQuery {
    /// Query returning every record for one client, oldest first.
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            filter: LocationFilter::default(),
            page: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_record_wire_names() {
        let record = LocationRecord {
            id: 7,
            latitude: Some(51.5),
            longitude: Some(-0.12),
            timestamp: "2024-01-01T10:00:00".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["lat"], 51.5);
        assert_eq!(json["lng"], -0.12);
        assert_eq!(json["timestamp"], "2024-01-01T10:00:00");
    }

    #[test]
    fn test_location_record_null_coordinates_stay_present() {
        let record = LocationRecord {
            id: 1,
            latitude: None,
            longitude: None,
            timestamp: "2024-01-01T10:00:00".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert!(json["lat"].is_null());
        assert!(json["lng"].is_null());
        assert!(json.as_object().unwrap().contains_key("lat"));
        assert!(json.as_object().unwrap().contains_key("lng"));
    }

    #[test]
    fn test_for_user_has_no_filters() {
        let query = LocationQuery::for_user("user1");
        assert_eq!(query.user_id, "user1");
        assert!(query.filter.start.is_none());
        assert!(query.filter.after_id.is_none());
        assert!(query.page.is_none());
    }
}
