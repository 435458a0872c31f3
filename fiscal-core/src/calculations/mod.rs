//! Lucro Real calculation pipeline: the four tax calculators, the
//! aggregator that merges them into one [`TaxResult`](crate::models::TaxResult),
//! and the monthly projection generator.

pub mod aggregate;
pub mod common;
pub mod icms;
pub mod irpj_csll;
pub mod iss;
pub mod pis_cofins;
pub mod projection;
pub mod validate;

pub use aggregate::{calculate, is_valid};
pub use icms::IcmsLedger;
pub use irpj_csll::ProfitTaxes;
pub use iss::ServiceTax;
pub use pis_cofins::{ContributionLedger, PisCofinsResult};
pub use projection::{project_monthly, MonthlyProjection};
pub use validate::{validate, ValidationError};
