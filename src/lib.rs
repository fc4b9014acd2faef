//! # Meal Planner Client Library
//!
//! Typed async access to the household meal planner backend. It consists of
//! two parts:
//!
//! ## Client Module
//!
//! The [`client`] module wraps the REST API: pantry lots and recipes (list,
//! get, create, update, delete) plus the health probe. Every call returns
//! `Result<T, ApiError>`, where [`ApiError`] carries the HTTP status, an
//! error code, a message, and the optional details and trace id the backend
//! reported.
//!
//! ## Config Module
//!
//! The [`config`] module holds the immutable base URL and request timeout,
//! built in code or read from the environment.
//!
//! ## Quick Start
//!
//! ```no_run
//! use meal_planner_client::{ApiClient, ClientConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = ApiClient::new(ClientConfig::from_env()?)?;
//!
//! let health = client.health().get().await?;
//! println!("Backend is {}", health.status);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;

pub use client::{ApiClient, ApiError};
pub use config::ClientConfig;
