use async_trait::async_trait;

use crate::contract::{
    client::FilmorateApi,
    error::FilmorateError,
    model::{Film, FilmPatch, Id, NewFilm, NewUser, User, UserPatch},
};
use crate::domain::Catalog;

/// Local implementation of the FilmorateApi trait that delegates to the domain services
pub struct FilmorateLocalClient {
    catalog: Catalog,
}

impl FilmorateLocalClient {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl FilmorateApi for FilmorateLocalClient {
    async fn create_film(&self, new_film: NewFilm) -> Result<Film, FilmorateError> {
        self.catalog.films.create_film(new_film).await.map_err(Into::into)
    }

    async fn update_film(&self, patch: FilmPatch) -> Result<Film, FilmorateError> {
        self.catalog.films.update_film(patch).await.map_err(Into::into)
    }

    async fn delete_film(&self, id: Id) -> Result<(), FilmorateError> {
        self.catalog.films.delete_film(id).await.map_err(Into::into)
    }

    async fn get_film(&self, id: Id) -> Result<Film, FilmorateError> {
        self.catalog.films.get_film(id).await.map_err(Into::into)
    }

    async fn list_films(&self) -> Result<Vec<Film>, FilmorateError> {
        self.catalog.films.list_films().await.map_err(Into::into)
    }

    async fn add_like(&self, film_id: Id, user_id: Id) -> Result<(), FilmorateError> {
        self.catalog
            .films
            .add_like(film_id, user_id)
            .await
            .map_err(Into::into)
    }

    async fn delete_like(&self, film_id: Id, user_id: Id) -> Result<(), FilmorateError> {
        self.catalog
            .films
            .delete_like(film_id, user_id)
            .await
            .map_err(Into::into)
    }

    async fn popular_films(&self, count: usize) -> Result<Vec<Film>, FilmorateError> {
        self.catalog.films.popular_films(count).await.map_err(Into::into)
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, FilmorateError> {
        self.catalog.users.create_user(new_user).await.map_err(Into::into)
    }

    async fn update_user(&self, patch: UserPatch) -> Result<User, FilmorateError> {
        self.catalog.users.update_user(patch).await.map_err(Into::into)
    }

    async fn delete_user(&self, id: Id) -> Result<(), FilmorateError> {
        self.catalog.users.delete_user(id).await.map_err(Into::into)
    }

    async fn get_user(&self, id: Id) -> Result<User, FilmorateError> {
        self.catalog.users.get_user(id).await.map_err(Into::into)
    }

    async fn list_users(&self) -> Result<Vec<User>, FilmorateError> {
        self.catalog.users.list_users().await.map_err(Into::into)
    }

    async fn add_friend(&self, user_id: Id, friend_id: Id) -> Result<(), FilmorateError> {
        self.catalog
            .users
            .add_friend(user_id, friend_id)
            .await
            .map_err(Into::into)
    }

    async fn delete_friend(&self, user_id: Id, friend_id: Id) -> Result<(), FilmorateError> {
        self.catalog
            .users
            .delete_friend(user_id, friend_id)
            .await
            .map_err(Into::into)
    }

    async fn friends(&self, id: Id) -> Result<Vec<User>, FilmorateError> {
        self.catalog.users.friends(id).await.map_err(Into::into)
    }

    async fn common_friends(&self, user_id: Id, other_id: Id) -> Result<Vec<User>, FilmorateError> {
        self.catalog
            .users
            .common_friends(user_id, other_id)
            .await
            .map_err(Into::into)
    }
}
