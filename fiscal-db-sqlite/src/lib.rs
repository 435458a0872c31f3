//! SQLite persistence for the fiscal engine: scenarios with their JSON
//! config/result documents and manual monthly entries for the regimes
//! the engine does not compute.

pub mod decimal;
pub mod repository;

pub use repository::SqliteRepository;
