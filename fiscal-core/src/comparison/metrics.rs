//! Normalised monthly figures and per-regime aggregated metrics.
//!
//! Computed Lucro Real results and manually entered figures for the
//! other regimes are folded into one shape so the rest of the engine
//! never cares where a number came from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::ratio_pct;
use crate::models::{ManualMonthlyEntry, TaxRegime, TaxResult};

/// One month of figures for one regime, whatever the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyFigures {
    pub revenue: Decimal,
    pub icms: Decimal,
    pub pis: Decimal,
    pub cofins: Decimal,
    pub irpj: Decimal,
    pub csll: Decimal,
    pub iss: Decimal,
    pub total_taxes: Decimal,
    pub net_profit: Decimal,
}

impl From<&TaxResult> for MonthlyFigures {
    fn from(result: &TaxResult) -> Self {
        Self {
            revenue: result.revenue,
            icms: result.icms_payable,
            pis: result.pis_payable,
            cofins: result.cofins_payable,
            irpj: result.irpj_payable,
            csll: result.csll_payable,
            iss: result.iss_payable,
            total_taxes: result.total_taxes,
            net_profit: result.net_profit,
        }
    }
}

impl From<&ManualMonthlyEntry> for MonthlyFigures {
    fn from(entry: &ManualMonthlyEntry) -> Self {
        Self {
            revenue: entry.revenue,
            icms: entry.icms,
            pis: entry.pis,
            cofins: entry.cofins,
            irpj: entry.irpj,
            csll: entry.csll,
            iss: entry.iss,
            total_taxes: entry.total_taxes(),
            net_profit: entry.net_profit(),
        }
    }
}

/// Figures for one regime summed over its covered months, with the
/// derived ratios recomputed behind the division guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeMetrics {
    pub regime: TaxRegime,
    pub revenue: Decimal,
    pub icms: Decimal,
    pub pis: Decimal,
    pub cofins: Decimal,
    pub irpj: Decimal,
    pub csll: Decimal,
    pub iss: Decimal,
    pub total_taxes: Decimal,
    pub net_profit: Decimal,
    pub tax_burden_pct: Decimal,
    pub profit_margin_pct: Decimal,
}

impl RegimeMetrics {
    /// Sums the given months for a regime. Returns `None` when there is
    /// nothing to sum, so an uncovered regime never produces zeroed
    /// metrics that look like real data.
    pub fn aggregate<'a, I>(
        regime: TaxRegime,
        months: I,
    ) -> Option<Self>
    where
        I: IntoIterator<Item = &'a MonthlyFigures>,
    {
        let mut any = false;
        let mut sum = MonthlyFigures {
            revenue: Decimal::ZERO,
            icms: Decimal::ZERO,
            pis: Decimal::ZERO,
            cofins: Decimal::ZERO,
            irpj: Decimal::ZERO,
            csll: Decimal::ZERO,
            iss: Decimal::ZERO,
            total_taxes: Decimal::ZERO,
            net_profit: Decimal::ZERO,
        };

        for figures in months {
            any = true;
            sum.revenue += figures.revenue;
            sum.icms += figures.icms;
            sum.pis += figures.pis;
            sum.cofins += figures.cofins;
            sum.irpj += figures.irpj;
            sum.csll += figures.csll;
            sum.iss += figures.iss;
            sum.total_taxes += figures.total_taxes;
            sum.net_profit += figures.net_profit;
        }

        if !any {
            return None;
        }

        Some(Self {
            regime,
            tax_burden_pct: ratio_pct(sum.total_taxes, sum.revenue),
            profit_margin_pct: ratio_pct(sum.net_profit, sum.revenue),
            revenue: sum.revenue,
            icms: sum.icms,
            pis: sum.pis,
            cofins: sum.cofins,
            irpj: sum.irpj,
            csll: sum.csll,
            iss: sum.iss,
            total_taxes: sum.total_taxes,
            net_profit: sum.net_profit,
        })
    }
}
