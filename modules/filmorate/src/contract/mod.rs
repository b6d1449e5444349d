pub mod client;
pub mod error;
pub mod model;

pub use client::FilmorateApi;
pub use error::FilmorateError;
pub use model::{Film, FilmPatch, Id, NewFilm, NewUser, User, UserPatch};
