//! PIS/COFINS non-cumulative ledgers (federal contributions on revenue).
//!
//! Both contributions share one taxable base: revenue net of the
//! monophasic share, which is collected earlier in the supply chain.
//! Credits accrue on purchases plus the credit-eligible expense base
//! (flat categories and `with_credit` dynamic items), each at the
//! contribution's own rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{max, pct, round_half_up};
use crate::models::TaxConfig;

/// Debit/credit ledger of a single contribution (PIS or COFINS).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionLedger {
    /// Revenue net of the monophasic share.
    pub base: Decimal,
    /// Contribution rate, 0–100 scale.
    pub rate: Decimal,
    pub debit: Decimal,
    pub credit: Decimal,
    pub payable: Decimal,
    pub carry_forward: Decimal,
}

/// The pair of contribution ledgers for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PisCofinsResult {
    pub pis: ContributionLedger,
    pub cofins: ContributionLedger,
}

/// Runs both ledgers on a validated config.
pub fn calculate(config: &TaxConfig) -> PisCofinsResult {
    let taxable = taxable_revenue(config);
    let credit_base = config.total_purchases() + config.creditable_expenses();

    PisCofinsResult {
        pis: ledger(taxable, credit_base, config.pis_rate),
        cofins: ledger(taxable, credit_base, config.cofins_rate),
    }
}

/// The monophasic exclusion applies identically to both contributions.
fn taxable_revenue(config: &TaxConfig) -> Decimal {
    config.revenue * (Decimal::ONE - pct(config.monophasic_revenue_pct))
}

fn ledger(
    taxable_revenue: Decimal,
    credit_base: Decimal,
    rate: Decimal,
) -> ContributionLedger {
    let debit = round_half_up(taxable_revenue * pct(rate));
    let credit = round_half_up(credit_base * pct(rate));

    ContributionLedger {
        base: taxable_revenue,
        rate,
        debit,
        credit,
        payable: max(debit - credit, Decimal::ZERO),
        carry_forward: max(credit - debit, Decimal::ZERO),
    }
}
