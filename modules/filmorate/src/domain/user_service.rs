use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::contract::model::{Id, NewUser, User, UserPatch};
use crate::domain::error::DomainError;
use crate::domain::repo::{FilmsRepository, UsersRepository};
use crate::domain::validation::require_id;

/// User rules: CRUD with name defaulting, plus the symmetric friend graph.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UsersRepository>,
    films: Arc<dyn FilmsRepository>,
    gate: Arc<Mutex<()>>,
}

/// A blank or missing display name falls back to the login.
fn resolve_name(name: Option<&str>, login: &str) -> String {
    match name {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => {
            debug!(login, "Name defaults to login");
            login.to_string()
        }
    }
}

impl UserService {
    pub fn new(
        users: Arc<dyn UsersRepository>,
        films: Arc<dyn FilmsRepository>,
        gate: Arc<Mutex<()>>,
    ) -> Self {
        Self { users, films, gate }
    }

    #[instrument(name = "filmorate.service.create_user", skip(self), fields(login = %new_user.login))]
    pub async fn create_user(&self, mut new_user: NewUser) -> Result<User, DomainError> {
        info!("Creating new user");
        new_user.name = Some(resolve_name(new_user.name.as_deref(), &new_user.login));

        let _guard = self.gate.lock().await;
        let user = self
            .users
            .insert(new_user)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        info!("Successfully created user with id={}", user.id);
        Ok(user)
    }

    #[instrument(name = "filmorate.service.update_user", skip(self), fields(user_id = ?patch.id))]
    pub async fn update_user(&self, patch: UserPatch) -> Result<User, DomainError> {
        info!("Updating user");
        let id = require_id(patch.id, "User")?;

        let _guard = self.gate.lock().await;
        let mut current = self.load_user(id).await?;
        // Decided before the login changes: a name equal to the login was defaulted.
        let name_tracks_login = current.name == current.login;

        if let Some(email) = patch.email {
            debug!(%email, "User email changed");
            current.email = email;
        }
        if let Some(login) = patch.login {
            debug!(%login, "User login changed");
            current.login = login;
        }
        match patch.name {
            Some(name) if !name.trim().is_empty() => {
                debug!(%name, "User name changed");
                current.name = name;
            }
            _ if name_tracks_login => {
                current.name = resolve_name(None, &current.login);
            }
            _ => {}
        }
        if let Some(birthday) = patch.birthday {
            debug!(%birthday, "User birthday changed");
            current.birthday = Some(birthday);
        }

        let updated = self
            .users
            .update(current.clone())
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        if !updated {
            return Err(DomainError::user_not_found(id));
        }

        info!("Successfully updated user");
        Ok(current)
    }

    /// Deletes the user and scrubs its id from every friend-set and like-set.
    #[instrument(name = "filmorate.service.delete_user", skip(self), fields(user_id = id))]
    pub async fn delete_user(&self, id: Id) -> Result<(), DomainError> {
        info!("Deleting user");

        let _guard = self.gate.lock().await;
        let user = self.load_user(id).await?;

        let mut former_friends = Vec::with_capacity(user.friends.len());
        for friend_id in &user.friends {
            if let Some(mut friend) = self.find_user(*friend_id).await? {
                friend.friends.remove(&id);
                former_friends.push(friend);
            }
        }
        self.users
            .update_many(former_friends)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        let liked: Vec<_> = self
            .films
            .list()
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?
            .into_iter()
            .filter_map(|mut film| film.likes.remove(&id).then_some(film))
            .collect();
        debug!(films = liked.len(), "Removing likes of deleted user");
        self.films
            .update_many(liked)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        self.users
            .delete(id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        info!("Successfully deleted user");
        Ok(())
    }

    #[instrument(name = "filmorate.service.get_user", skip(self), fields(user_id = id))]
    pub async fn get_user(&self, id: Id) -> Result<User, DomainError> {
        debug!("Getting user by id");
        self.load_user(id).await
    }

    #[instrument(name = "filmorate.service.list_users", skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        debug!("Listing users");
        self.users
            .list()
            .await
            .map_err(|e| DomainError::storage(e.to_string()))
    }

    /// Makes the two users friends of each other. Both sides are written together.
    #[instrument(name = "filmorate.service.add_friend", skip(self))]
    pub async fn add_friend(&self, user_id: Id, friend_id: Id) -> Result<(), DomainError> {
        info!("Adding friend");
        if user_id == friend_id {
            return Err(DomainError::validation(
                "friend_id",
                "a user cannot befriend themselves",
            ));
        }

        let _guard = self.gate.lock().await;
        let (mut user, mut friend) = self.load_pair(user_id, friend_id).await?;
        let changed = user.friends.insert(friend_id) | friend.friends.insert(user_id);
        if changed {
            self.users
                .update_many(vec![user, friend])
                .await
                .map_err(|e| DomainError::storage(e.to_string()))?;
            info!("Users are now friends");
        } else {
            debug!("Users are already friends");
        }
        Ok(())
    }

    #[instrument(name = "filmorate.service.delete_friend", skip(self))]
    pub async fn delete_friend(&self, user_id: Id, friend_id: Id) -> Result<(), DomainError> {
        info!("Removing friend");

        let _guard = self.gate.lock().await;
        let (mut user, mut friend) = self.load_pair(user_id, friend_id).await?;
        let changed = user.friends.remove(&friend_id) | friend.friends.remove(&user_id);
        if changed {
            self.users
                .update_many(vec![user, friend])
                .await
                .map_err(|e| DomainError::storage(e.to_string()))?;
            info!("Users are no longer friends");
        } else {
            debug!("Users were not friends");
        }
        Ok(())
    }

    #[instrument(name = "filmorate.service.friends", skip(self), fields(user_id = id))]
    pub async fn friends(&self, id: Id) -> Result<Vec<User>, DomainError> {
        debug!("Listing friends");
        let user = self.load_user(id).await?;
        self.resolve_all(user.friends.iter().copied()).await
    }

    /// Friends shared by both users, in the first user's friend order.
    #[instrument(name = "filmorate.service.common_friends", skip(self))]
    pub async fn common_friends(&self, user_id: Id, other_id: Id) -> Result<Vec<User>, DomainError> {
        debug!("Listing common friends");
        let (user, other) = self.load_pair(user_id, other_id).await?;
        let common = user
            .friends
            .iter()
            .copied()
            .filter(|id| other.friends.contains(id));
        self.resolve_all(common).await
    }

    async fn find_user(&self, id: Id) -> Result<Option<User>, DomainError> {
        self.users
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))
    }

    async fn load_user(&self, id: Id) -> Result<User, DomainError> {
        self.find_user(id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    async fn load_pair(&self, user_id: Id, other_id: Id) -> Result<(User, User), DomainError> {
        match (self.find_user(user_id).await?, self.find_user(other_id).await?) {
            (Some(user), Some(other)) => Ok((user, other)),
            _ => Err(DomainError::users_not_found(user_id, other_id)),
        }
    }

    async fn resolve_all(&self, ids: impl Iterator<Item = Id>) -> Result<Vec<User>, DomainError> {
        let mut resolved = Vec::new();
        for id in ids {
            match self.find_user(id).await? {
                Some(user) => resolved.push(user),
                None => warn!(friend_id = id, "Skipping dangling friend reference"),
            }
        }
        Ok(resolved)
    }
}
