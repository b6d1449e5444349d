//! Film and user catalog with likes, friendships and a popularity ranking.

// === PUBLIC CONTRACT ===
// Other modules consume the catalog through `contract` only
pub mod contract;

pub use contract::{client, error, model};
pub use contract::{
    Film, FilmPatch, FilmorateApi, FilmorateError, Id, NewFilm, NewUser, User, UserPatch,
};

// === MODULE DEFINITION ===
pub mod module;
pub use config::FilmorateConfig;
pub use module::Filmorate;

// === INTERNAL MODULES ===
// Exposed for integration tests; use `contract` for the stable API.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
#[doc(hidden)]
pub mod infra;
