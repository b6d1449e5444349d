use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::contract::model::{Film, FilmPatch, Id, NewFilm, User};
use crate::domain::error::DomainError;
use crate::domain::repo::{FilmsRepository, UsersRepository};
use crate::domain::validation::{require_id, valid_release_date};

/// Film catalog rules: CRUD, likes and the popularity ranking.
/// Depends only on the repository ports, not on infra types.
#[derive(Clone)]
pub struct FilmService {
    films: Arc<dyn FilmsRepository>,
    users: Arc<dyn UsersRepository>,
    /// Serializes every read-modify-write across both services.
    gate: Arc<Mutex<()>>,
}

impl FilmService {
    pub fn new(
        films: Arc<dyn FilmsRepository>,
        users: Arc<dyn UsersRepository>,
        gate: Arc<Mutex<()>>,
    ) -> Self {
        Self { films, users, gate }
    }

    #[instrument(name = "filmorate.service.create_film", skip(self), fields(name = %new_film.name))]
    pub async fn create_film(&self, new_film: NewFilm) -> Result<Film, DomainError> {
        info!("Creating new film");
        valid_release_date(new_film.release_date)?;

        let _guard = self.gate.lock().await;
        let film = self
            .films
            .insert(new_film)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        info!("Successfully created film with id={}", film.id);
        Ok(film)
    }

    #[instrument(name = "filmorate.service.update_film", skip(self), fields(film_id = ?patch.id))]
    pub async fn update_film(&self, patch: FilmPatch) -> Result<Film, DomainError> {
        info!("Updating film");
        let id = require_id(patch.id, "Film")?;

        let _guard = self.gate.lock().await;
        let mut current = self.load_film(id).await?;
        valid_release_date(patch.release_date)?;

        if let Some(name) = patch.name {
            debug!(%name, "Film name changed");
            current.name = name;
        }
        if let Some(description) = patch.description {
            debug!(%description, "Film description changed");
            current.description = Some(description);
        }
        if let Some(release_date) = patch.release_date {
            debug!(%release_date, "Film release date changed");
            current.release_date = Some(release_date);
        }
        if let Some(duration) = patch.duration {
            debug!(duration, "Film duration changed");
            current.duration = Some(duration);
        }

        let updated = self
            .films
            .update(current.clone())
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        if !updated {
            return Err(DomainError::film_not_found(id));
        }

        info!("Successfully updated film");
        Ok(current)
    }

    #[instrument(name = "filmorate.service.delete_film", skip(self), fields(film_id = id))]
    pub async fn delete_film(&self, id: Id) -> Result<(), DomainError> {
        info!("Deleting film");

        let _guard = self.gate.lock().await;
        let deleted = self
            .films
            .delete(id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        if !deleted {
            return Err(DomainError::film_not_found(id));
        }

        info!("Successfully deleted film");
        Ok(())
    }

    #[instrument(name = "filmorate.service.get_film", skip(self), fields(film_id = id))]
    pub async fn get_film(&self, id: Id) -> Result<Film, DomainError> {
        debug!("Getting film by id");
        self.load_film(id).await
    }

    #[instrument(name = "filmorate.service.list_films", skip(self))]
    pub async fn list_films(&self) -> Result<Vec<Film>, DomainError> {
        debug!("Listing films");
        self.films
            .list()
            .await
            .map_err(|e| DomainError::storage(e.to_string()))
    }

    #[instrument(name = "filmorate.service.add_like", skip(self))]
    pub async fn add_like(&self, film_id: Id, user_id: Id) -> Result<(), DomainError> {
        info!("Adding like");

        let _guard = self.gate.lock().await;
        let (mut film, _) = self.load_film_and_user(film_id, user_id).await?;
        if film.likes.insert(user_id) {
            self.films
                .update(film)
                .await
                .map_err(|e| DomainError::storage(e.to_string()))?;
            info!("Like added");
        } else {
            debug!("Film already liked by this user");
        }
        Ok(())
    }

    #[instrument(name = "filmorate.service.delete_like", skip(self))]
    pub async fn delete_like(&self, film_id: Id, user_id: Id) -> Result<(), DomainError> {
        info!("Removing like");

        let _guard = self.gate.lock().await;
        let (mut film, _) = self.load_film_and_user(film_id, user_id).await?;
        if film.likes.remove(&user_id) {
            self.films
                .update(film)
                .await
                .map_err(|e| DomainError::storage(e.to_string()))?;
            info!("Like removed");
        } else {
            debug!("Film was not liked by this user");
        }
        Ok(())
    }

    /// Films ordered by descending like count, at most `count` of them.
    /// Films with equal counts keep their catalog order.
    #[instrument(name = "filmorate.service.popular_films", skip(self))]
    pub async fn popular_films(&self, count: usize) -> Result<Vec<Film>, DomainError> {
        debug!("Ranking films by likes");
        let mut films = self.list_films().await?;
        films.sort_by(|a, b| b.likes.len().cmp(&a.likes.len()));
        films.truncate(count);
        Ok(films)
    }

    async fn load_film(&self, id: Id) -> Result<Film, DomainError> {
        self.films
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?
            .ok_or_else(|| DomainError::film_not_found(id))
    }

    async fn load_film_and_user(
        &self,
        film_id: Id,
        user_id: Id,
    ) -> Result<(Film, User), DomainError> {
        let film = self
            .films
            .find_by_id(film_id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        match (film, user) {
            (Some(film), Some(user)) => Ok((film, user)),
            _ => Err(DomainError::film_or_user_not_found(film_id, user_id)),
        }
    }
}
