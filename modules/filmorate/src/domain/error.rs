use chrono::NaiveDate;
use thiserror::Error;

use crate::contract::model::Id;

/// Coarse classification every domain error falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Unexpected,
}

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Film not found: {id}")]
    FilmNotFound { id: Id },

    #[error("User not found: {id}")]
    UserNotFound { id: Id },

    #[error("Film {film_id} or user {user_id} not found")]
    FilmOrUserNotFound { film_id: Id, user_id: Id },

    #[error("User {user_id} or user {other_id} not found")]
    UsersNotFound { user_id: Id, other_id: Id },

    #[error("{entity} id must be specified")]
    MissingId { entity: &'static str },

    #[error("Release date {date} is before {min}")]
    InvalidReleaseDate { date: NaiveDate, min: NaiveDate },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn film_not_found(id: Id) -> Self {
        Self::FilmNotFound { id }
    }

    pub fn user_not_found(id: Id) -> Self {
        Self::UserNotFound { id }
    }

    pub fn film_or_user_not_found(film_id: Id, user_id: Id) -> Self {
        Self::FilmOrUserNotFound { film_id, user_id }
    }

    pub fn users_not_found(user_id: Id, other_id: Id) -> Self {
        Self::UsersNotFound { user_id, other_id }
    }

    pub fn missing_id(entity: &'static str) -> Self {
        Self::MissingId { entity }
    }

    pub fn invalid_release_date(date: NaiveDate, min: NaiveDate) -> Self {
        Self::InvalidReleaseDate { date, min }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FilmNotFound { .. }
            | Self::UserNotFound { .. }
            | Self::FilmOrUserNotFound { .. }
            | Self::UsersNotFound { .. } => ErrorKind::NotFound,
            Self::MissingId { .. } | Self::InvalidReleaseDate { .. } | Self::Validation { .. } => {
                ErrorKind::Validation
            }
            Self::Storage { .. } => ErrorKind::Unexpected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_flat() {
        assert_eq!(DomainError::film_not_found(1).kind(), ErrorKind::NotFound);
        assert_eq!(
            DomainError::film_or_user_not_found(1, 2).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(DomainError::missing_id("Film").kind(), ErrorKind::Validation);
        assert_eq!(
            DomainError::validation("email", "bad").kind(),
            ErrorKind::Validation
        );
        assert_eq!(DomainError::storage("boom").kind(), ErrorKind::Unexpected);
    }

    #[test]
    fn messages_name_the_offending_ids() {
        let e = DomainError::users_not_found(3, 7);
        assert_eq!(e.to_string(), "User 3 or user 7 not found");
        let e = DomainError::missing_id("User");
        assert_eq!(e.to_string(), "User id must be specified");
    }
}
