use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::PeriodKind;

/// Immutable output of one Lucro Real computation.
///
/// The record is flat and serializable because downstream persistence
/// stores it verbatim. Rates are echoed on the 0–100 scale; every
/// `*_payable` field is floored at zero; `taxable_profit` and
/// `net_profit` stay signed so losses remain visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    /// Reporting period the progressive surtax threshold was pro-rated for.
    pub period: PeriodKind,
    pub revenue: Decimal,

    // ICMS ledger.
    pub icms_base: Decimal,
    pub icms_rate: Decimal,
    pub icms_debit: Decimal,
    pub icms_credit: Decimal,
    pub icms_payable: Decimal,
    pub icms_carry_forward: Decimal,

    // PIS ledger.
    pub pis_base: Decimal,
    pub pis_rate: Decimal,
    pub pis_debit: Decimal,
    pub pis_credit: Decimal,
    pub pis_payable: Decimal,
    pub pis_carry_forward: Decimal,

    // COFINS ledger.
    pub cofins_base: Decimal,
    pub cofins_rate: Decimal,
    pub cofins_debit: Decimal,
    pub cofins_credit: Decimal,
    pub cofins_payable: Decimal,
    pub cofins_carry_forward: Decimal,

    // IRPJ/CSLL.
    pub pretax_profit: Decimal,
    pub taxable_profit: Decimal,
    pub irpj_surtax_threshold: Decimal,
    pub irpj_rate: Decimal,
    pub irpj_base_tax: Decimal,
    pub irpj_surtax: Decimal,
    pub irpj_payable: Decimal,
    pub csll_rate: Decimal,
    pub csll_payable: Decimal,

    // ISS.
    pub iss_rate: Decimal,
    pub iss_payable: Decimal,

    // Aggregates.
    pub federal_taxes: Decimal,
    pub state_taxes: Decimal,
    pub municipal_taxes: Decimal,
    pub total_taxes: Decimal,
    pub cogs: Decimal,
    pub operating_expenses: Decimal,
    pub net_profit: Decimal,
    pub tax_burden_pct: Decimal,
    pub profit_margin_pct: Decimal,
}
