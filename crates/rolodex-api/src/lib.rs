// rolodex-api: Async Rust client for the rolodex users / social-media REST API

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::RolodexClient;
pub use error::Error;
pub use transport::TransportConfig;
