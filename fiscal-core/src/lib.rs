//! Core engine for Brazilian corporate tax estimation under Lucro Real,
//! plus cross-regime comparison against manually entered Lucro Presumido
//! and Simples Nacional figures.
//!
//! All money and rates are [`rust_decimal::Decimal`]; percentages use the
//! 0–100 scale throughout. Rounding is half-up to two decimal places and
//! happens only at ledger boundaries.

pub mod calculations;
pub mod comparison;
pub mod db;
pub mod models;

pub use db::repository::{FiscalRepository, RepositoryError};
pub use models::*;
