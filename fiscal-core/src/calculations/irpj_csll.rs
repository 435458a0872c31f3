//! IRPJ/CSLL — federal taxes on adjusted accounting profit, with the
//! progressive IRPJ surtax.
//!
//! The taxable profit is kept signed so losses remain visible in
//! reporting; only the tax bases are floored at zero. The surtax
//! exemption threshold is an annual figure pro-rated linearly by the
//! reporting period (R$20,000 per month for the default R$240,000).
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fiscal_core::{PeriodKind, TaxConfig};
//! use fiscal_core::calculations::irpj_csll;
//!
//! let config = TaxConfig {
//!     revenue: dec!(300000.00),
//!     ..TaxConfig::default()
//! };
//!
//! let taxes = irpj_csll::calculate(&config, PeriodKind::Year);
//! assert_eq!(taxes.irpj_base_tax, dec!(45000.00));
//! assert_eq!(taxes.irpj_surtax, dec!(6000.00));
//! assert_eq!(taxes.irpj_payable, dec!(51000.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{max, pct, round_half_up};
use crate::models::{PeriodKind, TaxConfig};

/// Outcome of the profit-tax computation for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitTaxes {
    pub pretax_profit: Decimal,
    /// Book profit adjusted by additions/exclusions; signed.
    pub taxable_profit: Decimal,
    /// Surtax exemption threshold after period apportionment.
    pub surtax_threshold: Decimal,
    pub operating_expenses: Decimal,
    pub irpj_base_tax: Decimal,
    pub irpj_surtax: Decimal,
    pub irpj_payable: Decimal,
    pub csll_payable: Decimal,
}

/// Runs the profit-tax computation on a validated config.
pub fn calculate(
    config: &TaxConfig,
    period: PeriodKind,
) -> ProfitTaxes {
    let operating_expenses = config.operating_expenses();
    let pretax_profit = config.revenue - config.cogs - operating_expenses;
    let taxable_profit = pretax_profit + config.irpj_additions - config.irpj_exclusions;
    let positive_base = max(taxable_profit, Decimal::ZERO);

    let threshold = apportioned_threshold(config.irpj_surtax_annual_threshold, period);
    let surtax_base = max(taxable_profit - threshold, Decimal::ZERO);

    let irpj_base_tax = round_half_up(positive_base * pct(config.irpj_rate));
    let irpj_surtax = round_half_up(surtax_base * pct(config.irpj_surtax_rate));

    ProfitTaxes {
        pretax_profit,
        taxable_profit,
        surtax_threshold: threshold,
        operating_expenses,
        irpj_base_tax,
        irpj_surtax,
        irpj_payable: irpj_base_tax + irpj_surtax,
        csll_payable: round_half_up(positive_base * pct(config.csll_rate)),
    }
}

/// One twelfth of the annual threshold per month covered by the period.
fn apportioned_threshold(
    annual: Decimal,
    period: PeriodKind,
) -> Decimal {
    annual / Decimal::from(12) * Decimal::from(period.months())
}
