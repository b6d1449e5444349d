use async_trait::async_trait;

use crate::contract::{
    error::FilmorateError,
    model::{Film, FilmPatch, Id, NewFilm, NewUser, User, UserPatch},
};

/// Public API trait for the filmorate module that other modules can use
#[async_trait]
pub trait FilmorateApi: Send + Sync {
    async fn create_film(&self, new_film: NewFilm) -> Result<Film, FilmorateError>;

    /// Update a film with partial data; `patch.id` selects the film
    async fn update_film(&self, patch: FilmPatch) -> Result<Film, FilmorateError>;

    async fn delete_film(&self, id: Id) -> Result<(), FilmorateError>;

    async fn get_film(&self, id: Id) -> Result<Film, FilmorateError>;

    async fn list_films(&self) -> Result<Vec<Film>, FilmorateError>;

    async fn add_like(&self, film_id: Id, user_id: Id) -> Result<(), FilmorateError>;

    async fn delete_like(&self, film_id: Id, user_id: Id) -> Result<(), FilmorateError>;

    /// Most liked films first, at most `count` of them
    async fn popular_films(&self, count: usize) -> Result<Vec<Film>, FilmorateError>;

    async fn create_user(&self, new_user: NewUser) -> Result<User, FilmorateError>;

    /// Update a user with partial data; `patch.id` selects the user
    async fn update_user(&self, patch: UserPatch) -> Result<User, FilmorateError>;

    async fn delete_user(&self, id: Id) -> Result<(), FilmorateError>;

    async fn get_user(&self, id: Id) -> Result<User, FilmorateError>;

    async fn list_users(&self) -> Result<Vec<User>, FilmorateError>;

    async fn add_friend(&self, user_id: Id, friend_id: Id) -> Result<(), FilmorateError>;

    async fn delete_friend(&self, user_id: Id, friend_id: Id) -> Result<(), FilmorateError>;

    async fn friends(&self, id: Id) -> Result<Vec<User>, FilmorateError>;

    async fn common_friends(&self, user_id: Id, other_id: Id) -> Result<Vec<User>, FilmorateError>;
}
