//! Poe2Scout API client and wire models

pub mod client;
pub mod models;

pub use client::{ScoutClient, DEFAULT_BASE_URL};
pub use models::{CurrencyItem, ItemMetadata, Paged, PriceLog, UniqueItem};
