//! Query parameter types for API handlers.

use chrono::{DateTime, NaiveDateTime, Utc};
use marketplace_core::search::SearchCriteria;
use marketplace_core::types::Timestamp;
use serde::Deserialize;

use crate::error::AppError;

/// Zone-less formats accepted for search dates, read as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Search parameters for `GET /ads`.
///
/// Names follow the public query contract
/// (`?latitude=&longitude=&distance=&beginDate=&endDate=&minRate=`).
/// Dates stay raw strings here so a malformed value produces the same
/// JSON error body as any other bad request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Radius in kilometres.
    pub distance: Option<f64>,
    pub begin_date: Option<String>,
    pub end_date: Option<String>,
    pub min_rate: Option<f64>,
}

impl SearchParams {
    /// Parse dates and map names onto [`SearchCriteria`]. Range and
    /// grouping checks are left to the search engine.
    pub fn into_criteria(self) -> Result<SearchCriteria, AppError> {
        Ok(SearchCriteria {
            latitude: self.latitude,
            longitude: self.longitude,
            radius_km: self.distance,
            begin_date: parse_optional("beginDate", self.begin_date.as_deref())?,
            end_date: parse_optional("endDate", self.end_date.as_deref())?,
            min_rating: self.min_rate,
        })
    }
}

fn parse_optional(field: &str, raw: Option<&str>) -> Result<Option<Timestamp>, AppError> {
    raw.map(|value| {
        parse_timestamp(value).ok_or_else(|| {
            AppError::BadRequest(format!(
                "{field}: expected an RFC 3339 or YYYY-MM-DDTHH:MM:SS datetime, got '{value}'"
            ))
        })
    })
    .transpose()
}

/// Accept RFC 3339, or a zone-less datetime interpreted as UTC.
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn parses_rfc3339_with_offset() {
        let ts = parse_timestamp("2024-09-19T11:00:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 9, 19, 9, 0, 0).unwrap());
    }

    #[test]
    fn parses_naive_as_utc() {
        let ts = parse_timestamp("2024-09-19T09:00:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 9, 19, 9, 0, 0).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("next tuesday").is_none());
        assert!(parse_timestamp("2024-09-19").is_none());
    }

    #[test]
    fn malformed_date_is_bad_request() {
        let params = SearchParams {
            begin_date: Some("yesterday".into()),
            end_date: Some("2024-09-19T09:00:00".into()),
            ..Default::default()
        };
        assert_matches!(params.into_criteria(), Err(AppError::BadRequest(msg)) if msg.starts_with("beginDate"));
    }

    #[test]
    fn distance_maps_to_radius() {
        let params = SearchParams {
            latitude: Some(45.0),
            longitude: Some(4.0),
            distance: Some(10.0),
            min_rate: Some(4.5),
            ..Default::default()
        };
        let criteria = params.into_criteria().unwrap();
        assert_eq!(criteria.radius_km, Some(10.0));
        assert_eq!(criteria.min_rating, Some(4.5));
        assert!(criteria.begin_date.is_none());
    }
}
