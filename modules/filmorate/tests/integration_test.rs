use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;

use filmorate::{
    contract::client::FilmorateApi,
    contract::model::{FilmPatch, NewFilm, NewUser, UserPatch},
    domain::{error::DomainError, Catalog},
    gateways::local::FilmorateLocalClient,
    FilmorateError,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn film(name: &str) -> NewFilm {
    NewFilm {
        name: name.to_string(),
        description: Some(format!("About {name}")),
        release_date: Some(date(2000, 1, 1)),
        duration: Some(100),
    }
}

fn user(login: &str) -> NewUser {
    NewUser {
        email: format!("{login}@example.com"),
        login: login.to_string(),
        name: None,
        birthday: Some(date(1990, 5, 17)),
    }
}

/// Catalog with `n` users named u1..un
async fn catalog_with_users(n: usize) -> Result<Catalog> {
    let catalog = Catalog::in_memory();
    for i in 1..=n {
        catalog.users.create_user(user(&format!("u{i}"))).await?;
    }
    Ok(catalog)
}

fn friend_ids(users: &[filmorate::User]) -> Vec<u64> {
    users.iter().map(|u| u.id).collect()
}

#[tokio::test]
async fn test_film_crud() -> Result<()> {
    let catalog = Catalog::in_memory();
    let films = &catalog.films;

    let created = films.create_film(film("Avatar")).await?;
    assert_eq!(created.id, 1);
    assert_eq!(created.name, "Avatar");
    assert!(created.likes.is_empty());

    let fetched = films.get_film(created.id).await?;
    assert_eq!(fetched, created);

    let all = films.list_films().await?;
    assert_eq!(all.len(), 1);

    films.delete_film(created.id).await?;
    assert!(matches!(
        films.get_film(created.id).await,
        Err(DomainError::FilmNotFound { id: 1 })
    ));
    assert!(matches!(
        films.delete_film(created.id).await,
        Err(DomainError::FilmNotFound { .. })
    ));

    Ok(())
}

#[tokio::test]
async fn test_ids_are_sequential_and_never_reused() -> Result<()> {
    let catalog = Catalog::in_memory();
    let films = &catalog.films;

    let mut ids = Vec::new();
    for name in ["A", "B", "C"] {
        ids.push(films.create_film(film(name)).await?.id);
    }
    assert_eq!(ids, vec![1, 2, 3]);

    films.delete_film(2).await?;
    assert_eq!(films.create_film(film("D")).await?.id, 4);

    // Removing the highest id must not hand it out again either
    films.delete_film(4).await?;
    assert_eq!(films.create_film(film("E")).await?.id, 5);

    let listed: Vec<_> = films.list_films().await?.into_iter().map(|f| f.id).collect();
    assert_eq!(listed, vec![1, 3, 5]);

    Ok(())
}

#[tokio::test]
async fn test_release_date_boundary() -> Result<()> {
    let catalog = Catalog::in_memory();
    let films = &catalog.films;

    let mut early = film("Too early");
    early.release_date = Some(date(1895, 12, 27));
    assert!(matches!(
        films.create_film(early).await,
        Err(DomainError::InvalidReleaseDate { .. })
    ));
    assert!(films.list_films().await?.is_empty());

    let mut first = film("First screening");
    first.release_date = Some(date(1895, 12, 28));
    let first = films.create_film(first).await?;

    let mut undated = film("Undated");
    undated.release_date = None;
    films.create_film(undated).await?;

    // Rejected update leaves the stored film untouched
    let err = films
        .update_film(FilmPatch {
            id: Some(first.id),
            name: Some("Renamed".into()),
            release_date: Some(date(1800, 1, 1)),
            ..Default::default()
        })
        .await;
    assert!(matches!(err, Err(DomainError::InvalidReleaseDate { .. })));
    assert_eq!(films.get_film(first.id).await?, first);

    Ok(())
}

#[tokio::test]
async fn test_update_film_merges_present_fields() -> Result<()> {
    let catalog = Catalog::in_memory();
    let films = &catalog.films;
    let stored = films.create_film(film("Avatar")).await?;

    let updated = films
        .update_film(FilmPatch {
            id: Some(stored.id),
            description: Some("Blue people".into()),
            ..Default::default()
        })
        .await?;
    assert_eq!(updated.description.as_deref(), Some("Blue people"));
    assert_eq!(updated.name, stored.name);
    assert_eq!(updated.release_date, stored.release_date);
    assert_eq!(updated.duration, stored.duration);
    assert_eq!(films.get_film(stored.id).await?, updated);

    assert!(matches!(
        films.update_film(FilmPatch::default()).await,
        Err(DomainError::MissingId { entity: "Film" })
    ));
    assert!(matches!(
        films
            .update_film(FilmPatch {
                id: Some(42),
                ..Default::default()
            })
            .await,
        Err(DomainError::FilmNotFound { id: 42 })
    ));

    Ok(())
}

#[tokio::test]
async fn test_update_keeps_likes() -> Result<()> {
    let catalog = catalog_with_users(1).await?;
    let stored = catalog.films.create_film(film("Avatar")).await?;
    catalog.films.add_like(stored.id, 1).await?;

    let updated = catalog
        .films
        .update_film(FilmPatch {
            id: Some(stored.id),
            duration: Some(162),
            ..Default::default()
        })
        .await?;
    assert_eq!(updated.duration, Some(162));
    assert!(updated.likes.contains(&1));

    Ok(())
}

#[tokio::test]
async fn test_likes_are_idempotent() -> Result<()> {
    let catalog = catalog_with_users(2).await?;
    let films = &catalog.films;
    let avatar = films.create_film(film("Avatar")).await?;

    films.add_like(avatar.id, 1).await?;
    films.add_like(avatar.id, 1).await?;
    assert_eq!(films.get_film(avatar.id).await?.likes.len(), 1);

    films.delete_like(avatar.id, 2).await?;
    assert_eq!(films.get_film(avatar.id).await?.likes.len(), 1);

    films.delete_like(avatar.id, 1).await?;
    assert!(films.get_film(avatar.id).await?.likes.is_empty());

    assert!(matches!(
        films.add_like(avatar.id, 99).await,
        Err(DomainError::FilmOrUserNotFound {
            film_id: 1,
            user_id: 99
        })
    ));
    assert!(matches!(
        films.delete_like(99, 1).await,
        Err(DomainError::FilmOrUserNotFound { .. })
    ));

    Ok(())
}

#[tokio::test]
async fn test_popular_films() -> Result<()> {
    let catalog = catalog_with_users(3).await?;
    let films = &catalog.films;
    for name in ["A", "B", "C", "D"] {
        films.create_film(film(name)).await?;
    }
    // C: 3 likes, A: 1 like, B and D: none
    for user_id in 1..=3 {
        films.add_like(3, user_id).await?;
    }
    films.add_like(1, 2).await?;

    let top: Vec<_> = films.popular_films(2).await?.into_iter().map(|f| f.id).collect();
    assert_eq!(top, vec![3, 1]);

    // Ties keep catalog order; oversize count returns everything
    let all: Vec<_> = films.popular_films(10).await?.into_iter().map(|f| f.id).collect();
    assert_eq!(all, vec![3, 1, 2, 4]);

    assert!(films.popular_films(0).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_user_name_defaults_to_login() -> Result<()> {
    let catalog = Catalog::in_memory();
    let users = &catalog.users;

    let alice = users.create_user(user("alice")).await?;
    assert_eq!(alice.name, "alice");

    let mut blank = user("bob");
    blank.name = Some("  ".into());
    assert_eq!(users.create_user(blank).await?.name, "bob");

    let mut named = user("carol");
    named.name = Some("Carol".into());
    assert_eq!(users.create_user(named).await?.name, "Carol");

    Ok(())
}

#[tokio::test]
async fn test_name_tracks_login_on_update() -> Result<()> {
    let catalog = Catalog::in_memory();
    let users = &catalog.users;

    let alice = users.create_user(user("alice")).await?;
    let updated = users
        .update_user(UserPatch {
            id: Some(alice.id),
            login: Some("alice2".into()),
            ..Default::default()
        })
        .await?;
    assert_eq!(updated.login, "alice2");
    assert_eq!(updated.name, "alice2");

    // An explicit name stops the tracking
    let mut carol = user("carol");
    carol.name = Some("Carol".into());
    let carol = users.create_user(carol).await?;
    let updated = users
        .update_user(UserPatch {
            id: Some(carol.id),
            login: Some("carol2".into()),
            ..Default::default()
        })
        .await?;
    assert_eq!(updated.name, "Carol");
    assert_eq!(updated.email, "carol@example.com");

    Ok(())
}

#[tokio::test]
async fn test_update_user_errors() -> Result<()> {
    let catalog = catalog_with_users(1).await?;
    let users = &catalog.users;

    assert!(matches!(
        users.update_user(UserPatch::default()).await,
        Err(DomainError::MissingId { entity: "User" })
    ));
    assert!(matches!(
        users
            .update_user(UserPatch {
                id: Some(7),
                ..Default::default()
            })
            .await,
        Err(DomainError::UserNotFound { id: 7 })
    ));

    Ok(())
}

#[tokio::test]
async fn test_friendship_is_symmetric_and_idempotent() -> Result<()> {
    let catalog = catalog_with_users(2).await?;
    let users = &catalog.users;

    users.add_friend(1, 2).await?;
    users.add_friend(2, 1).await?;
    let a = users.get_user(1).await?;
    let b = users.get_user(2).await?;
    assert_eq!(a.friends.iter().copied().collect::<Vec<_>>(), vec![2]);
    assert_eq!(b.friends.iter().copied().collect::<Vec<_>>(), vec![1]);

    assert_eq!(friend_ids(&users.friends(1).await?), vec![2]);

    users.delete_friend(1, 2).await?;
    assert!(users.get_user(1).await?.friends.is_empty());
    assert!(users.get_user(2).await?.friends.is_empty());

    // Removing a non-existent friendship is a no-op
    users.delete_friend(1, 2).await?;

    Ok(())
}

#[tokio::test]
async fn test_friendship_errors() -> Result<()> {
    let catalog = catalog_with_users(1).await?;
    let users = &catalog.users;

    assert!(matches!(
        users.add_friend(1, 1).await,
        Err(DomainError::Validation { .. })
    ));
    assert!(matches!(
        users.add_friend(1, 5).await,
        Err(DomainError::UsersNotFound {
            user_id: 1,
            other_id: 5
        })
    ));
    assert!(users.get_user(1).await?.friends.is_empty());
    assert!(matches!(
        users.friends(5).await,
        Err(DomainError::UserNotFound { id: 5 })
    ));

    Ok(())
}

#[tokio::test]
async fn test_common_friends() -> Result<()> {
    let catalog = catalog_with_users(5).await?;
    let users = &catalog.users;

    users.add_friend(1, 3).await?;
    users.add_friend(2, 4).await?;
    assert!(users.common_friends(1, 2).await?.is_empty());

    users.add_friend(1, 5).await?;
    users.add_friend(2, 5).await?;
    users.add_friend(2, 3).await?;
    let common = users.common_friends(1, 2).await?;
    assert_eq!(friend_ids(&common), vec![3, 5]);
    assert_eq!(common[0].login, "u3");

    assert!(matches!(
        users.common_friends(1, 9).await,
        Err(DomainError::UsersNotFound { .. })
    ));

    Ok(())
}

#[tokio::test]
async fn test_delete_missing_user_changes_nothing() -> Result<()> {
    let catalog = catalog_with_users(2).await?;
    let users = &catalog.users;
    users.add_friend(1, 2).await?;
    let before = users.list_users().await?;

    assert!(matches!(
        users.delete_user(999).await,
        Err(DomainError::UserNotFound { id: 999 })
    ));
    assert_eq!(users.list_users().await?, before);

    Ok(())
}

#[tokio::test]
async fn test_delete_user_scrubs_references() -> Result<()> {
    let catalog = catalog_with_users(3).await?;
    let avatar = catalog.films.create_film(film("Avatar")).await?;
    catalog.users.add_friend(1, 2).await?;
    catalog.users.add_friend(3, 2).await?;
    catalog.films.add_like(avatar.id, 2).await?;
    catalog.films.add_like(avatar.id, 3).await?;

    catalog.users.delete_user(2).await?;

    assert!(catalog.users.get_user(1).await?.friends.is_empty());
    assert!(catalog.users.friends(3).await?.is_empty());
    let likes: Vec<_> = catalog.films.get_film(avatar.id).await?.likes.into_iter().collect();
    assert_eq!(likes, vec![3]);

    // Deleted ids are not recycled for users either
    assert_eq!(catalog.users.create_user(user("dave")).await?.id, 4);

    Ok(())
}

#[tokio::test]
async fn test_concurrent_friend_requests_stay_symmetric() -> Result<()> {
    let catalog = catalog_with_users(10).await?;

    let mut tasks = Vec::new();
    for other in 2..=10 {
        let users = Arc::clone(&catalog.users);
        tasks.push(tokio::spawn(async move { users.add_friend(1, other).await }));
        let users = Arc::clone(&catalog.users);
        tasks.push(tokio::spawn(async move { users.add_friend(other, 1).await }));
    }
    for task in tasks {
        task.await??;
    }

    assert_eq!(catalog.users.get_user(1).await?.friends.len(), 9);
    for other in 2..=10 {
        let friends = catalog.users.get_user(other).await?.friends;
        assert_eq!(friends.into_iter().collect::<Vec<_>>(), vec![1]);
    }

    Ok(())
}

#[tokio::test]
async fn test_local_client_maps_errors() -> Result<()> {
    let client: Arc<dyn FilmorateApi> = Arc::new(FilmorateLocalClient::new(Catalog::in_memory()));

    let user = client.create_user(user("alice")).await?;
    let avatar = client.create_film(film("Avatar")).await?;
    client.add_like(avatar.id, user.id).await?;
    let popular = client.popular_films(10).await?;
    assert_eq!(popular[0].likes.len(), 1);

    match client.get_film(404).await {
        Err(FilmorateError::NotFound { message }) => assert_eq!(message, "Film not found: 404"),
        other => panic!("Expected NotFound, got {other:?}"),
    }
    assert!(matches!(
        client.add_friend(user.id, user.id).await,
        Err(FilmorateError::Validation { .. })
    ));
    assert!(matches!(
        client.update_film(FilmPatch::default()).await,
        Err(FilmorateError::Validation { .. })
    ));

    Ok(())
}
