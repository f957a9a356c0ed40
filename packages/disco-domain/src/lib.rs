pub mod kind;
pub mod query;
pub mod ranking;
pub mod timeframe;

mod error;

pub use error::{Error, Result};
