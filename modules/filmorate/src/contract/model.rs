use std::collections::BTreeSet;

use chrono::NaiveDate;

/// Identifier of a film or a user.
pub type Id = u64;

/// Pure film model for inter-module communication (no serde)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Film {
    pub id: Id,
    pub name: String,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    /// Duration in minutes
    pub duration: Option<u32>,
    /// Ids of the users who liked this film
    pub likes: BTreeSet<Id>,
}

/// Data for creating a new film
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewFilm {
    pub name: String,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration: Option<u32>,
}

/// Partial update data for a film.
///
/// `id` is optional so that "no id supplied" can be told apart from "unknown id".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilmPatch {
    pub id: Option<Id>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration: Option<u32>,
}

/// Pure user model for inter-module communication (no serde)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Id,
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: Option<NaiveDate>,
    /// Ids of this user's friends
    pub friends: BTreeSet<Id>,
}

/// Data for creating a new user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewUser {
    pub email: String,
    pub login: String,
    /// Falls back to `login` when absent or blank
    pub name: Option<String>,
    pub birthday: Option<NaiveDate>,
}

/// Partial update data for a user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    pub id: Option<Id>,
    pub email: Option<String>,
    pub login: Option<String>,
    pub name: Option<String>,
    pub birthday: Option<NaiveDate>,
}
