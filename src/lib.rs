pub mod aggregate;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod pipeline;

pub use error::{Error, Result};
