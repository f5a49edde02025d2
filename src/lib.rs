pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;

pub use catalog::{sync_catalog, CatalogError, CatalogSource, SyncReport};
pub use config::Config;
pub use db::{init_db, Repository};
pub use domain::{Item, ItemId, LedgerEntry, Quantity, TimeMs, TradeSide};
pub use engine::{
    Clock, FairnessLabel, FairnessView, ReconciliationResult, RestockCountdown, SystemClock,
    TradeLedger,
};
pub use error::AppError;
