//! Business logic services

pub mod categories;
pub mod equipment;
pub mod movements;
pub mod stats;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub categories: categories::CategoriesService,
    pub equipment: equipment::EquipmentService,
    pub movements: movements::MovementsService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            categories: categories::CategoriesService::new(repository.clone()),
            equipment: equipment::EquipmentService::new(repository.clone()),
            movements: movements::MovementsService::new(repository.clone()),
            stats: stats::StatsService::new(repository),
        }
    }
}

/// Parse a caller-supplied ISO-8601 timestamp. Accepts a full RFC 3339
/// date-time (trailing `Z` included), a naive date-time, or a bare date
/// taken as midnight UTC.
pub(crate) fn parse_datetime(value: &str, field: &str) -> AppResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).unwrap().and_utc());
    }
    Err(AppError::Validation(format!(
        "Invalid {}: expected an ISO-8601 date or date-time",
        field
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_rfc3339_with_z() {
        let dt = parse_datetime("2024-03-01T12:30:00Z", "moved_at").unwrap();
        assert_eq!(dt.hour(), 12);
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_datetime("2024-03-01T12:30:00+02:00", "moved_at").unwrap();
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn test_parse_naive_datetime() {
        assert!(parse_datetime("2024-03-01T12:30:00", "acquisition_date").is_ok());
        assert!(parse_datetime("2024-03-01T12:30:00.250", "acquisition_date").is_ok());
    }

    #[test]
    fn test_parse_bare_date() {
        let dt = parse_datetime("2024-03-01", "acquisition_date").unwrap();
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_garbage_is_a_validation_error() {
        let err = parse_datetime("last tuesday", "acquisition_date").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
