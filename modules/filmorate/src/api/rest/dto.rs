use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::contract::model::{Film, FilmPatch, Id, NewFilm, NewUser, User, UserPatch};
use crate::domain::error::DomainError;

static LOGIN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+$").expect("valid login regex"));

/// First failing field of a `validator` run, as a domain validation error.
fn first_violation(errors: ValidationErrors) -> DomainError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    match fields.first() {
        Some((field, errs)) => {
            let message = errs
                .first()
                .map(|e| match &e.message {
                    Some(m) => m.to_string(),
                    None => e.code.to_string(),
                })
                .unwrap_or_else(|| "invalid value".to_string());
            DomainError::validation(field.to_string(), message)
        }
        None => DomainError::validation("request", errors.to_string()),
    }
}

fn check_not_blank(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, "must not be blank"));
    }
    Ok(())
}

fn check_login(login: &str) -> Result<(), DomainError> {
    if !LOGIN_RE.is_match(login) {
        return Err(DomainError::validation(
            "login",
            "must not be blank or contain whitespace",
        ));
    }
    Ok(())
}

fn check_birthday(birthday: Option<NaiveDate>) -> Result<(), DomainError> {
    match birthday {
        Some(date) if date > Local::now().date_naive() => Err(DomainError::validation(
            "birthday",
            "must not be in the future",
        )),
        _ => Ok(()),
    }
}

/// REST DTO for film representation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmDto {
    pub id: Id,
    pub name: String,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration: Option<u32>,
    pub likes: Vec<Id>,
}

/// REST DTO for creating a new film
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFilmReq {
    pub name: String,
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    #[validate(range(min = 1, message = "must be positive"))]
    pub duration: Option<u32>,
}

/// REST DTO for updating a film (partial, id in body)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFilmReq {
    pub id: Option<Id>,
    pub name: Option<String>,
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    #[validate(range(min = 1, message = "must be positive"))]
    pub duration: Option<u32>,
}

/// REST DTO for user representation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Id,
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: Option<NaiveDate>,
    pub friends: Vec<Id>,
}

/// REST DTO for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserReq {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    pub login: String,
    pub name: Option<String>,
    pub birthday: Option<NaiveDate>,
}

/// REST DTO for updating a user (partial, id in body)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserReq {
    pub id: Option<Id>,
    #[validate(email(message = "invalid email format"))]
    pub email: Option<String>,
    pub login: Option<String>,
    pub name: Option<String>,
    pub birthday: Option<NaiveDate>,
}

/// Query parameters of the popularity ranking
#[derive(Debug, Clone, Deserialize)]
pub struct PopularQuery {
    pub count: Option<usize>,
}

impl CreateFilmReq {
    pub fn check(&self) -> Result<(), DomainError> {
        check_not_blank("name", &self.name)?;
        self.validate().map_err(first_violation)
    }
}

impl UpdateFilmReq {
    pub fn check(&self) -> Result<(), DomainError> {
        if let Some(name) = &self.name {
            check_not_blank("name", name)?;
        }
        self.validate().map_err(first_violation)
    }
}

impl CreateUserReq {
    pub fn check(&self) -> Result<(), DomainError> {
        check_not_blank("email", &self.email)?;
        self.validate().map_err(first_violation)?;
        check_login(&self.login)?;
        check_birthday(self.birthday)
    }
}

impl UpdateUserReq {
    pub fn check(&self) -> Result<(), DomainError> {
        self.validate().map_err(first_violation)?;
        if let Some(login) = &self.login {
            check_login(login)?;
        }
        check_birthday(self.birthday)
    }
}

// Conversion implementations between REST DTOs and contract models

impl From<Film> for FilmDto {
    fn from(film: Film) -> Self {
        Self {
            id: film.id,
            name: film.name,
            description: film.description,
            release_date: film.release_date,
            duration: film.duration,
            likes: film.likes.into_iter().collect(),
        }
    }
}

impl From<CreateFilmReq> for NewFilm {
    fn from(req: CreateFilmReq) -> Self {
        Self {
            name: req.name,
            description: req.description,
            release_date: req.release_date,
            duration: req.duration,
        }
    }
}

impl From<UpdateFilmReq> for FilmPatch {
    fn from(req: UpdateFilmReq) -> Self {
        Self {
            id: req.id,
            name: req.name,
            description: req.description,
            release_date: req.release_date,
            duration: req.duration,
        }
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            login: user.login,
            name: user.name,
            birthday: user.birthday,
            friends: user.friends.into_iter().collect(),
        }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            email: req.email,
            login: req.login,
            name: req.name,
            birthday: req.birthday,
        }
    }
}

impl From<UpdateUserReq> for UserPatch {
    fn from(req: UpdateUserReq) -> Self {
        Self {
            id: req.id,
            email: req.email,
            login: req.login,
            name: req.name,
            birthday: req.birthday,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_req() -> CreateUserReq {
        CreateUserReq {
            email: "alice@example.com".to_string(),
            login: "alice".to_string(),
            name: None,
            birthday: NaiveDate::from_ymd_opt(1990, 1, 1),
        }
    }

    fn field_of(err: DomainError) -> String {
        match err {
            DomainError::Validation { field, .. } => field,
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_user_passes() {
        assert!(user_req().check().is_ok());
    }

    #[test]
    fn user_field_rules() {
        let mut req = user_req();
        req.email = "not-an-email".into();
        assert_eq!(field_of(req.check().unwrap_err()), "email");

        let mut req = user_req();
        req.login = "al ice".into();
        assert_eq!(field_of(req.check().unwrap_err()), "login");

        let mut req = user_req();
        req.birthday = Some(Local::now().date_naive() + chrono::Days::new(1));
        assert_eq!(field_of(req.check().unwrap_err()), "birthday");
    }

    #[test]
    fn film_field_rules() {
        let req = CreateFilmReq {
            name: "  ".into(),
            description: None,
            release_date: None,
            duration: None,
        };
        assert_eq!(field_of(req.check().unwrap_err()), "name");

        let req = CreateFilmReq {
            name: "Avatar".into(),
            description: Some("x".repeat(201)),
            release_date: None,
            duration: Some(120),
        };
        assert_eq!(field_of(req.check().unwrap_err()), "description");

        let req = UpdateFilmReq {
            duration: Some(0),
            ..Default::default()
        };
        assert_eq!(field_of(req.check().unwrap_err()), "duration");

        let req = CreateFilmReq {
            name: "Avatar".into(),
            description: Some("x".repeat(200)),
            release_date: None,
            duration: Some(1),
        };
        assert!(req.check().is_ok());
    }

    #[test]
    fn json_uses_camel_case() {
        let req: UpdateFilmReq =
            serde_json::from_str(r#"{"id":1,"releaseDate":"2007-08-31"}"#).unwrap();
        assert_eq!(req.id, Some(1));
        assert_eq!(req.release_date, NaiveDate::from_ymd_opt(2007, 8, 31));
        assert_eq!(req.name, None);
    }
}
