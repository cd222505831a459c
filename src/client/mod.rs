// File: ./src/client/mod.rs
pub mod api;
pub mod core;

pub use self::api::ActivityApi;
pub use self::core::BetterClient;
