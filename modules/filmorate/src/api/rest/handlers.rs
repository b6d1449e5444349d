use std::sync::Arc;

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query},
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use tracing::{error, info};

use crate::api::rest::dto::{
    CreateFilmReq, CreateUserReq, FilmDto, PopularQuery, UpdateFilmReq, UpdateUserReq, UserDto,
};
use crate::api::rest::error::map_domain_error;
use crate::api::rest::problem::ProblemResponse;
use crate::config::FilmorateConfig;
use crate::contract::model::Id;
use crate::domain::error::DomainError;
use crate::domain::film_service::FilmService;
use crate::domain::user_service::UserService;

/// JSON body extractor whose rejections render as problem responses
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ProblemResponse))]
pub struct ApiJson<T>(pub T);

/// Path extractor whose rejections render as problem responses
#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(ProblemResponse))]
pub struct ApiPath<T>(pub T);

/// Query extractor whose rejections render as problem responses
#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(ProblemResponse))]
pub struct ApiQuery<T>(pub T);

type Films = Extension<Arc<FilmService>>;
type Users = Extension<Arc<UserService>>;

fn films_dto(films: Vec<crate::contract::model::Film>) -> Json<Vec<FilmDto>> {
    Json(films.into_iter().map(FilmDto::from).collect())
}

fn users_dto(users: Vec<crate::contract::model::User>) -> Json<Vec<UserDto>> {
    Json(users.into_iter().map(UserDto::from).collect())
}

/// List all films
pub async fn list_films(
    Extension(svc): Films,
    uri: Uri,
) -> Result<Json<Vec<FilmDto>>, ProblemResponse> {
    info!("Listing films");

    match svc.list_films().await {
        Ok(films) => Ok(films_dto(films)),
        Err(e) => {
            error!("Failed to list films: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Get a specific film by ID
pub async fn get_film(
    Extension(svc): Films,
    ApiPath(id): ApiPath<Id>,
    uri: Uri,
) -> Result<Json<FilmDto>, ProblemResponse> {
    info!("Getting film with id: {}", id);

    match svc.get_film(id).await {
        Ok(film) => Ok(Json(FilmDto::from(film))),
        Err(e) => {
            error!("Failed to get film {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Create a new film
pub async fn create_film(
    uri: Uri,
    Extension(svc): Films,
    ApiJson(req_body): ApiJson<CreateFilmReq>,
) -> Result<(StatusCode, Json<FilmDto>), ProblemResponse> {
    info!("Creating film: {:?}", req_body);

    let result = match req_body.check() {
        Ok(()) => svc.create_film(req_body.into()).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(film) => Ok((StatusCode::CREATED, Json(FilmDto::from(film)))),
        Err(e) => {
            error!("Failed to create film: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Update an existing film; the body carries the id
pub async fn update_film(
    uri: Uri,
    Extension(svc): Films,
    ApiJson(req_body): ApiJson<UpdateFilmReq>,
) -> Result<Json<FilmDto>, ProblemResponse> {
    info!("Updating film with: {:?}", req_body);

    let result = match req_body.check() {
        Ok(()) => svc.update_film(req_body.into()).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(film) => Ok(Json(FilmDto::from(film))),
        Err(e) => {
            error!("Failed to update film: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Delete a film by ID
pub async fn delete_film(
    Extension(svc): Films,
    ApiPath(id): ApiPath<Id>,
    uri: Uri,
) -> Result<StatusCode, ProblemResponse> {
    info!("Deleting film: {}", id);

    match svc.delete_film(id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete film {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn add_like(
    Extension(svc): Films,
    ApiPath((film_id, user_id)): ApiPath<(Id, Id)>,
    uri: Uri,
) -> Result<StatusCode, ProblemResponse> {
    info!("User {} likes film {}", user_id, film_id);

    match svc.add_like(film_id, user_id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to add like: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn delete_like(
    Extension(svc): Films,
    ApiPath((film_id, user_id)): ApiPath<(Id, Id)>,
    uri: Uri,
) -> Result<StatusCode, ProblemResponse> {
    info!("User {} withdraws like from film {}", user_id, film_id);

    match svc.delete_like(film_id, user_id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete like: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Most liked films; `count` defaults from config
pub async fn popular_films(
    Extension(svc): Films,
    Extension(cfg): Extension<FilmorateConfig>,
    ApiQuery(query): ApiQuery<PopularQuery>,
    uri: Uri,
) -> Result<Json<Vec<FilmDto>>, ProblemResponse> {
    info!("Listing popular films: {:?}", query);

    let count = query.count.unwrap_or(cfg.default_popular_count);
    let result = if count == 0 || count > cfg.max_popular_count {
        Err(DomainError::validation(
            "count",
            format!("must be between 1 and {}", cfg.max_popular_count),
        ))
    } else {
        svc.popular_films(count).await
    };
    match result {
        Ok(films) => Ok(films_dto(films)),
        Err(e) => {
            error!("Failed to list popular films: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// List all users
pub async fn list_users(
    Extension(svc): Users,
    uri: Uri,
) -> Result<Json<Vec<UserDto>>, ProblemResponse> {
    info!("Listing users");

    match svc.list_users().await {
        Ok(users) => Ok(users_dto(users)),
        Err(e) => {
            error!("Failed to list users: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Get a specific user by ID
pub async fn get_user(
    Extension(svc): Users,
    ApiPath(id): ApiPath<Id>,
    uri: Uri,
) -> Result<Json<UserDto>, ProblemResponse> {
    info!("Getting user with id: {}", id);

    match svc.get_user(id).await {
        Ok(user) => Ok(Json(UserDto::from(user))),
        Err(e) => {
            error!("Failed to get user {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Create a new user
pub async fn create_user(
    uri: Uri,
    Extension(svc): Users,
    ApiJson(req_body): ApiJson<CreateUserReq>,
) -> Result<(StatusCode, Json<UserDto>), ProblemResponse> {
    info!("Creating user: {:?}", req_body);

    let result = match req_body.check() {
        Ok(()) => svc.create_user(req_body.into()).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(user) => Ok((StatusCode::CREATED, Json(UserDto::from(user)))),
        Err(e) => {
            error!("Failed to create user: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Update an existing user; the body carries the id
pub async fn update_user(
    uri: Uri,
    Extension(svc): Users,
    ApiJson(req_body): ApiJson<UpdateUserReq>,
) -> Result<Json<UserDto>, ProblemResponse> {
    info!("Updating user with: {:?}", req_body);

    let result = match req_body.check() {
        Ok(()) => svc.update_user(req_body.into()).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(user) => Ok(Json(UserDto::from(user))),
        Err(e) => {
            error!("Failed to update user: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Delete a user by ID
pub async fn delete_user(
    Extension(svc): Users,
    ApiPath(id): ApiPath<Id>,
    uri: Uri,
) -> Result<StatusCode, ProblemResponse> {
    info!("Deleting user: {}", id);

    match svc.delete_user(id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete user {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn add_friend(
    Extension(svc): Users,
    ApiPath((id, friend_id)): ApiPath<(Id, Id)>,
    uri: Uri,
) -> Result<StatusCode, ProblemResponse> {
    info!("User {} adds friend {}", id, friend_id);

    match svc.add_friend(id, friend_id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to add friend: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn delete_friend(
    Extension(svc): Users,
    ApiPath((id, friend_id)): ApiPath<(Id, Id)>,
    uri: Uri,
) -> Result<StatusCode, ProblemResponse> {
    info!("User {} removes friend {}", id, friend_id);

    match svc.delete_friend(id, friend_id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete friend: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn friends(
    Extension(svc): Users,
    ApiPath(id): ApiPath<Id>,
    uri: Uri,
) -> Result<Json<Vec<UserDto>>, ProblemResponse> {
    info!("Listing friends of user {}", id);

    match svc.friends(id).await {
        Ok(users) => Ok(users_dto(users)),
        Err(e) => {
            error!("Failed to list friends of {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn common_friends(
    Extension(svc): Users,
    ApiPath((id, other_id)): ApiPath<(Id, Id)>,
    uri: Uri,
) -> Result<Json<Vec<UserDto>>, ProblemResponse> {
    info!("Listing common friends of users {} and {}", id, other_id);

    match svc.common_friends(id, other_id).await {
        Ok(users) => Ok(users_dto(users)),
        Err(e) => {
            error!("Failed to list common friends: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
