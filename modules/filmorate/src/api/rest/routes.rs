use axum::{
    routing::{get, put},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::config::FilmorateConfig;
use crate::domain::Catalog;

pub fn register_routes(
    mut router: Router,
    catalog: Catalog,
    config: FilmorateConfig,
) -> anyhow::Result<Router> {
    if config.default_popular_count == 0
        || config.default_popular_count > config.max_popular_count
    {
        anyhow::bail!(
            "default_popular_count must be between 1 and max_popular_count ({})",
            config.max_popular_count
        );
    }

    // Films
    router = router
        .route(
            "/films",
            get(handlers::list_films)
                .post(handlers::create_film)
                .put(handlers::update_film),
        )
        // Static segment wins over the `{id}` capture in axum's matcher
        .route("/films/popular", get(handlers::popular_films))
        .route(
            "/films/{id}",
            get(handlers::get_film).delete(handlers::delete_film),
        )
        .route(
            "/films/{id}/like/{user_id}",
            put(handlers::add_like).delete(handlers::delete_like),
        );

    // Users
    router = router
        .route(
            "/users",
            get(handlers::list_users)
                .post(handlers::create_user)
                .put(handlers::update_user),
        )
        .route(
            "/users/{id}",
            get(handlers::get_user).delete(handlers::delete_user),
        )
        .route(
            "/users/{id}/friends",
            get(handlers::friends),
        )
        .route(
            "/users/{id}/friends/{friend_id}",
            put(handlers::add_friend).delete(handlers::delete_friend),
        )
        .route(
            "/users/{id}/friends/common/{other_id}",
            get(handlers::common_friends),
        );

    let router = router
        .layer(Extension(catalog.films))
        .layer(Extension(catalog.users))
        .layer(Extension(config));

    Ok(router)
}
