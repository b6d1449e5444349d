//! State-free checks the services run before touching a repository.

use chrono::NaiveDate;
use tracing::warn;

use crate::contract::model::Id;
use crate::domain::error::DomainError;

/// Date of the first public film screening. No film can be released earlier.
pub const FIRST_SCREENING: NaiveDate = match NaiveDate::from_ymd_opt(1895, 12, 28) {
    Some(date) => date,
    None => panic!("invalid first screening date"),
};

pub fn valid_release_date(release_date: Option<NaiveDate>) -> Result<(), DomainError> {
    match release_date {
        Some(date) if date < FIRST_SCREENING => {
            warn!(release_date = %date, "Release date precedes the first screening");
            Err(DomainError::invalid_release_date(date, FIRST_SCREENING))
        }
        _ => Ok(()),
    }
}

/// Unwraps the id of an update request, failing with `MissingId` when absent.
pub fn require_id(id: Option<Id>, entity: &'static str) -> Result<Id, DomainError> {
    id.ok_or_else(|| {
        warn!(entity, "Update request without id");
        DomainError::missing_id(entity)
    })
}
