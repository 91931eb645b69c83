//! Background price-data synchronization for Poe2Scout.
//!
//! Keeps a per-league, multi-category price dataset fresh on disk and in
//! memory: at most one refresh runs at a time, every category falls back to
//! its on-disk backup when the web is unavailable, and consumers only ever
//! see complete, immutable snapshots.

pub mod cache;
pub mod data;
pub mod error;
pub mod logging;
pub mod scout;
pub mod settings;
pub mod sync;

pub use cache::{LeagueCache, LeagueMetadata};
pub use data::{category, CategoryDef, PriceData, DIVINE_ORB};
pub use error::{Result, SyncError};
pub use logging::{StatusLog, StatusSink};
pub use scout::client::{ScoutClient, DEFAULT_BASE_URL};
pub use scout::models::{CurrencyItem, ItemMetadata, Paged, PriceLog, UniqueItem};
pub use settings::SyncSettings;
pub use sync::{ScoutSync, SyncConfig};
