pub mod catalog;
pub mod error;
pub mod film_service;
pub mod id;
pub mod repo;
pub mod user_service;
pub mod validation;

pub use catalog::Catalog;
