//! In-memory repository implementations for the domain ports.
//!
//! Each repository owns one ordered map behind a `parking_lot::RwLock`. Locks are
//! never held across an `.await`, so the async trait methods complete without
//! suspending. Nothing survives a process restart.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::contract::model::{Film, Id, NewFilm, NewUser, User};
use crate::domain::id::IdAllocator;
use crate::domain::repo::{FilmsRepository, UsersRepository};

/// Records that carry their own identifier.
trait Keyed {
    fn id(&self) -> Id;
}

impl Keyed for Film {
    fn id(&self) -> Id {
        self.id
    }
}

impl Keyed for User {
    fn id(&self) -> Id {
        self.id
    }
}

/// Map plus allocator, guarded together so id assignment and insert are one step.
struct Table<T> {
    rows: BTreeMap<Id, T>,
    ids: IdAllocator,
}

impl<T: Keyed + Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            ids: IdAllocator::new(),
        }
    }

    fn insert_with(&mut self, build: impl FnOnce(Id) -> T) -> T {
        let id = self.ids.next(self.rows.keys());
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    fn replace(&mut self, row: T) -> bool {
        match self.rows.get_mut(&row.id()) {
            Some(slot) => {
                *slot = row;
                true
            }
            None => false,
        }
    }
}

/// Film storage backed by an ordered map.
pub struct InMemoryFilmsRepository {
    table: RwLock<Table<Film>>,
}

impl InMemoryFilmsRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table::new()),
        }
    }
}

impl Default for InMemoryFilmsRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl FilmsRepository for InMemoryFilmsRepository {
    async fn insert(&self, new_film: NewFilm) -> anyhow::Result<Film> {
        let film = self.table.write().insert_with(|id| Film {
            id,
            name: new_film.name,
            description: new_film.description,
            release_date: new_film.release_date,
            duration: new_film.duration,
            likes: Default::default(),
        });
        Ok(film)
    }

    async fn find_by_id(&self, id: Id) -> anyhow::Result<Option<Film>> {
        Ok(self.table.read().rows.get(&id).cloned())
    }

    async fn update(&self, film: Film) -> anyhow::Result<bool> {
        Ok(self.table.write().replace(film))
    }

    async fn update_many(&self, films: Vec<Film>) -> anyhow::Result<()> {
        let mut table = self.table.write();
        for film in films {
            table.replace(film);
        }
        Ok(())
    }

    async fn delete(&self, id: Id) -> anyhow::Result<bool> {
        Ok(self.table.write().rows.remove(&id).is_some())
    }

    async fn list(&self) -> anyhow::Result<Vec<Film>> {
        Ok(self.table.read().rows.values().cloned().collect())
    }
}

/// User storage backed by an ordered map.
pub struct InMemoryUsersRepository {
    table: RwLock<Table<User>>,
}

impl InMemoryUsersRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table::new()),
        }
    }
}

impl Default for InMemoryUsersRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl UsersRepository for InMemoryUsersRepository {
    async fn insert(&self, new_user: NewUser) -> anyhow::Result<User> {
        let user = self.table.write().insert_with(|id| User {
            id,
            name: new_user.name.unwrap_or_else(|| new_user.login.clone()),
            email: new_user.email,
            login: new_user.login,
            birthday: new_user.birthday,
            friends: Default::default(),
        });
        Ok(user)
    }

    async fn find_by_id(&self, id: Id) -> anyhow::Result<Option<User>> {
        Ok(self.table.read().rows.get(&id).cloned())
    }

    async fn update(&self, user: User) -> anyhow::Result<bool> {
        Ok(self.table.write().replace(user))
    }

    async fn update_many(&self, users: Vec<User>) -> anyhow::Result<()> {
        let mut table = self.table.write();
        for user in users {
            table.replace(user);
        }
        Ok(())
    }

    async fn delete(&self, id: Id) -> anyhow::Result<bool> {
        Ok(self.table.write().rows.remove(&id).is_some())
    }

    async fn list(&self) -> anyhow::Result<Vec<User>> {
        Ok(self.table.read().rows.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_film(name: &str) -> NewFilm {
        NewFilm {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_from_one() {
        let repo = InMemoryFilmsRepository::new();
        for expected in 1..=3 {
            let film = repo.insert(new_film("Film")).await.unwrap();
            assert_eq!(film.id, expected);
        }
        let ids: Vec<Id> = repo.list().await.unwrap().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn update_of_unknown_id_reports_false() {
        let repo = InMemoryFilmsRepository::new();
        let mut film = repo.insert(new_film("Avatar")).await.unwrap();
        film.id = 42;
        assert!(!repo.update(film).await.unwrap());
        assert!(repo.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_does_not_free_the_id() {
        let repo = InMemoryUsersRepository::new();
        let new_user = NewUser {
            email: "a@b.c".into(),
            login: "a".into(),
            ..Default::default()
        };
        let first = repo.insert(new_user.clone()).await.unwrap();
        assert!(repo.delete(first.id).await.unwrap());
        assert!(!repo.delete(first.id).await.unwrap());
        let second = repo.insert(new_user).await.unwrap();
        assert_eq!(second.id, 2);
        assert_eq!(second.name, "a");
    }

    #[tokio::test]
    async fn update_many_skips_unknown_rows() {
        let repo = InMemoryUsersRepository::new();
        let mut u = repo
            .insert(NewUser {
                email: "a@b.c".into(),
                login: "a".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        u.friends.insert(9);
        let mut ghost = u.clone();
        ghost.id = 9;
        repo.update_many(vec![u, ghost]).await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 1);
        assert!(repo.find_by_id(1).await.unwrap().unwrap().friends.contains(&9));
    }
}
