//! Thin wrappers over the marketplace REST endpoints.

pub mod admin;
pub mod client;
pub mod profile;
pub mod rent;
pub mod shop;
pub mod traits;

pub use admin::AdminApi;
pub use client::ApiClient;
pub use profile::ProfileApi;
pub use rent::RentApi;
pub use shop::ShopApi;
pub use traits::ListingSource;
