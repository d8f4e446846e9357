// surefly-api: Async Rust client for the Sure Petcare cloud API

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod transport;

pub use auth::{ClientAuth, Credentials, token_seems_valid};
pub use client::SureClient;
pub use error::Error;
