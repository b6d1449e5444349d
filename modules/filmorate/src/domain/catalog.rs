use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::film_service::FilmService;
use crate::domain::repo::{FilmsRepository, UsersRepository};
use crate::domain::user_service::UserService;
use crate::infra::storage::in_memory::{InMemoryFilmsRepository, InMemoryUsersRepository};

/// Both services wired over the same repositories and one mutation gate.
///
/// Every write in either service holds the gate, so a like can never race a
/// user deletion and a friendship is never half-written.
#[derive(Clone)]
pub struct Catalog {
    pub films: Arc<FilmService>,
    pub users: Arc<UserService>,
}

impl Catalog {
    pub fn new(films: Arc<dyn FilmsRepository>, users: Arc<dyn UsersRepository>) -> Self {
        let gate = Arc::new(Mutex::new(()));
        Self {
            films: Arc::new(FilmService::new(films.clone(), users.clone(), gate.clone())),
            users: Arc::new(UserService::new(users, films, gate)),
        }
    }

    /// Fresh, empty in-memory catalog.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryFilmsRepository::new()),
            Arc::new(InMemoryUsersRepository::new()),
        )
    }
}
