//! HTTP transport for the leaderboard gateway.
//!
//! Implements [`client_gateway_core::Gateway`] against the JSON API:
//!
//! ```text
//! GET  /api/users                         list users
//! POST /api/users              {name}     create user
//! POST /api/users/claim        {userId}   claim points
//! GET  /api/users/leaderboard             ranked rows
//! GET  /api/users/history?page&limit      global history page
//! GET  /api/users/history/{id}?page&limit per-user history page
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use client_gateway_http::{GatewayConfig, HttpGateway};
//!
//! let gateway = HttpGateway::new(GatewayConfig::from_env()?);
//! let users = gateway.list_users().await?;
//! ```

pub mod client;
pub mod config;

pub use client::HttpGateway;
pub use config::{ConfigError, DEFAULT_BASE_URL, GatewayConfig};
