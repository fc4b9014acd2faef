//! # Meal Planner HTTP Client
//!
//! This module provides a typed HTTP client for the meal planner REST API,
//! covering pantry lots, recipes, and the health probe.
//!
//! ## Modules
//!
//! - [`client`] - HTTP client core: URL building, JSON bodies, response handling
//! - [`error`] - Structured error type every failure normalizes to
//! - [`pantry`] - Pantry lot endpoints
//! - [`recipes`] - Recipe endpoints
//! - [`health`] - Health endpoint
//! - [`types`] - Request and response types, filters, validation, pagination
//!
//! ## Quick Start
//!
//! ```no_run
//! use meal_planner_client::client::{ApiClient, PantryFilters};
//!
//! # async fn example() -> Result<(), meal_planner_client::client::ApiError> {
//! let client = ApiClient::with_base_url("http://localhost:8080/api")?;
//!
//! let filters = PantryFilters {
//!     name: Some("egg".to_string()),
//!     limit: Some(20),
//!     ..Default::default()
//! };
//! let lots = client.pantry().list(&filters).await?;
//! println!("Found {} pantry lots", lots.total);
//! # Ok(())
//! # }
//! ```

#[allow(clippy::module_inception)]
pub mod client;
pub mod error;
pub mod health;
pub mod pantry;
pub mod recipes;
pub mod types;

pub use client::ApiClient;
pub use error::{ApiError, ErrorResponse};
pub use health::HealthApi;
pub use pantry::PantryApi;
pub use recipes::RecipeApi;
pub use types::*;
