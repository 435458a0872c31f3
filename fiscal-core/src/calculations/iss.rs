//! ISS — flat municipal tax on services. No credit mechanism; relevant
//! only when the company renders services (a zero rate turns it off).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{pct, round_half_up};
use crate::models::TaxConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTax {
    /// Municipal rate, 0–100 scale.
    pub rate: Decimal,
    pub payable: Decimal,
}

pub fn calculate(config: &TaxConfig) -> ServiceTax {
    ServiceTax {
        rate: config.iss_rate,
        payable: round_half_up(config.revenue * pct(config.iss_rate)),
    }
}
