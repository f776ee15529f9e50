//! Typed gateway over the gallery backend's REST API.

pub mod client;
pub mod error;
pub mod gateway;
pub mod types;

pub use client::HttpGateway;
pub use error::ApiError;
pub use gateway::Gateway;
pub use types::{Credentials, Folder, Photo, Registration, TokenPair, User};
