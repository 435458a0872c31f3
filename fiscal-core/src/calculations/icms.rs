//! ICMS debit/credit ledger (state VAT on circulation of goods).
//!
//! Debits accrue on the revenue share that is not under tax substitution;
//! substitution-taxed revenue was already taxed upstream and never
//! generates debit here. Credits come from taxed purchases plus flat
//! add-ons (opening stock, fixed assets, industrial energy, ST inputs,
//! other). Excess credit becomes a carry-forward balance, never a refund.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fiscal_core::TaxConfig;
//! use fiscal_core::calculations::icms;
//!
//! let config = TaxConfig {
//!     revenue: dec!(1800000.00),
//!     purchases_in_state: dec!(600000.00),
//!     ..TaxConfig::default()
//! };
//!
//! let ledger = icms::calculate(&config);
//! assert_eq!(ledger.debit, dec!(324000.00));
//! assert_eq!(ledger.credit, dec!(108000.00));
//! assert_eq!(ledger.payable, dec!(216000.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{max, pct, round_half_up};
use crate::models::TaxConfig;

/// Outcome of the ICMS ledger for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IcmsLedger {
    /// Revenue net of the substitution-taxed share.
    pub base: Decimal,
    /// In-state rate applied to the base, 0–100 scale.
    pub rate: Decimal,
    pub debit: Decimal,
    pub credit: Decimal,
    pub payable: Decimal,
    pub carry_forward: Decimal,
}

/// Runs the ledger on a validated config.
pub fn calculate(config: &TaxConfig) -> IcmsLedger {
    let base = taxable_base(config);
    let debit = round_half_up(base * pct(config.icms_in_state_rate));
    let credit = round_half_up(purchase_credits(config) + flat_credits(config));
    let net = debit - credit;

    IcmsLedger {
        base,
        rate: config.icms_in_state_rate,
        debit,
        credit,
        payable: max(net, Decimal::ZERO),
        carry_forward: max(-net, Decimal::ZERO),
    }
}

fn taxable_base(config: &TaxConfig) -> Decimal {
    config.revenue * (Decimal::ONE - pct(config.st_revenue_pct))
}

/// Each purchase category credits at its rate; for-use purchases are
/// in-state acquisitions and credit at the in-state rate.
fn purchase_credits(config: &TaxConfig) -> Decimal {
    config.purchases_in_state * pct(config.icms_in_state_rate)
        + config.purchases_interstate * pct(config.icms_interstate_rate)
        + config.purchases_for_use * pct(config.icms_in_state_rate)
}

fn flat_credits(config: &TaxConfig) -> Decimal {
    config.credit_opening_stock
        + config.credit_fixed_assets
        + config.credit_industrial_energy
        + config.credit_st_inputs
        + config.credit_other
}
