pub mod aggregates;
pub mod cache;
pub mod db;
pub mod entities;
pub mod lock;
pub mod models;
pub mod relations;
pub mod scoring;
pub mod tags;
pub mod trending;

mod error;
mod filters;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
