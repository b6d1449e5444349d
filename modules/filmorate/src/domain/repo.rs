use async_trait::async_trait;

use crate::contract::model::{Film, Id, NewFilm, NewUser, User};

/// Port for the domain layer: film persistence operations.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait FilmsRepository: Send + Sync {
    /// Assign a fresh id and store the film. No validation happens here.
    async fn insert(&self, new_film: NewFilm) -> anyhow::Result<Film>;
    /// Load a film by id.
    async fn find_by_id(&self, id: Id) -> anyhow::Result<Option<Film>>;
    /// Overwrite an existing film. Returns false if `film.id` is unknown.
    async fn update(&self, film: Film) -> anyhow::Result<bool>;
    /// Overwrite several films at once; readers see all or none of them.
    /// Unknown ids are skipped.
    async fn update_many(&self, films: Vec<Film>) -> anyhow::Result<()>;
    /// Delete by id. Returns true if a film was deleted.
    async fn delete(&self, id: Id) -> anyhow::Result<bool>;
    /// Snapshot of all films in insertion order.
    async fn list(&self) -> anyhow::Result<Vec<Film>>;
}

/// Port for the domain layer: user persistence operations.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Assign a fresh id and store the user. The name must already be resolved.
    async fn insert(&self, new_user: NewUser) -> anyhow::Result<User>;
    async fn find_by_id(&self, id: Id) -> anyhow::Result<Option<User>>;
    async fn update(&self, user: User) -> anyhow::Result<bool>;
    /// Overwrite several users at once; used for two-sided friend edges.
    async fn update_many(&self, users: Vec<User>) -> anyhow::Result<()>;
    async fn delete(&self, id: Id) -> anyhow::Result<bool>;
    async fn list(&self) -> anyhow::Result<Vec<User>>;
}
