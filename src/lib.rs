//! Client library for the campus marketplace.
//!
//! Covers the shop vertical (second-hand products), the rent vertical (rooms and
//! flats), and the admin panel: typed REST access, listing filters, form
//! validation with image upload, and session-based route gating.

pub mod api;
pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod filter;
pub mod forms;
pub mod models;
pub mod notify;
pub mod search;
pub mod storage;

pub use api::ApiClient;
pub use config::AppConfig;
pub use error::{MarketError, Result};
