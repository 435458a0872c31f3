//! Monthly projection: pro-rates an annual config into twelve equal
//! slices and runs the full pipeline on each.
//!
//! The sum of the twelve monthly `total_taxes` need not equal the single
//! annual computation — the IRPJ surtax threshold is period-sensitive,
//! so the difference is expected behaviour, not a defect.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::{aggregate, ValidationError};
use crate::models::{PeriodKind, TaxConfig, TaxResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyProjection {
    /// Calendar month, 1–12.
    pub month: u8,
    pub result: TaxResult,
}

/// Computes twelve monthly results from an annual config.
///
/// # Errors
///
/// Returns [`ValidationError`] when the annual config violates the input
/// contract; the slices inherit its validity.
pub fn project_monthly(config: &TaxConfig) -> Result<Vec<MonthlyProjection>, ValidationError> {
    let slice = monthly_slice(config);

    (1..=12)
        .map(|month| {
            let result = aggregate::calculate(&slice, PeriodKind::Month)?;
            Ok(MonthlyProjection { month, result })
        })
        .collect()
}

/// Divides every monetary amount by 12; rates and shares are unchanged.
fn monthly_slice(config: &TaxConfig) -> TaxConfig {
    let twelve = Decimal::from(12);
    let mut slice = config.clone();

    slice.revenue /= twelve;
    slice.purchases_in_state /= twelve;
    slice.purchases_interstate /= twelve;
    slice.purchases_for_use /= twelve;
    slice.cogs /= twelve;
    slice.credit_opening_stock /= twelve;
    slice.credit_fixed_assets /= twelve;
    slice.credit_industrial_energy /= twelve;
    slice.credit_st_inputs /= twelve;
    slice.credit_other /= twelve;
    slice.expense_energy /= twelve;
    slice.expense_rent /= twelve;
    slice.expense_leasing /= twelve;
    slice.expense_freight /= twelve;
    slice.expense_depreciation /= twelve;
    slice.expense_fuel /= twelve;
    slice.expense_transport_vouchers /= twelve;
    slice.irpj_additions /= twelve;
    slice.irpj_exclusions /= twelve;
    for item in &mut slice.expenses {
        item.amount /= twelve;
    }

    slice
}
