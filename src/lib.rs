//! Serp Scout - campaign keyword generation and SERP lookup server
//!
//! Generates search keywords from a campaign PDF and fetches top organic
//! results for a chosen keyword. SERP lookups are memoized in an in-process
//! TTL cache with lazy expiry and an expiry-ordered capacity guard.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod keywords;
pub mod models;
pub mod serp;

pub use api::AppState;
pub use config::Config;
pub use error::{AppError, Result};
