//! Input validation for the calculation pipeline.
//!
//! Calculators fail fast on invalid input so a corrupted result can never
//! be produced, let alone persisted. `Decimal` is always finite, so the
//! checks reduce to sign and percentage-range constraints.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::TaxConfig;

/// Errors raised when a configuration snapshot fails the input contract.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A monetary amount or rate is negative.
    #[error("'{field}' must not be negative (got {value})")]
    Negative { field: &'static str, value: Decimal },

    /// A revenue-share percentage is outside the 0–100 scale.
    #[error("'{field}' must be a percentage between 0 and 100 (got {value})")]
    ShareOutOfRange { field: &'static str, value: Decimal },

    /// A dynamic expense item carries a negative amount.
    #[error("expense item '{description}' must not have a negative amount (got {value})")]
    NegativeExpense { description: String, value: Decimal },
}

/// Checks every numeric field of the config against the input contract.
pub fn validate(config: &TaxConfig) -> Result<(), ValidationError> {
    let non_negative = [
        ("revenue", config.revenue),
        ("icms_in_state_rate", config.icms_in_state_rate),
        ("icms_interstate_rate", config.icms_interstate_rate),
        ("pis_rate", config.pis_rate),
        ("cofins_rate", config.cofins_rate),
        ("irpj_rate", config.irpj_rate),
        ("irpj_surtax_rate", config.irpj_surtax_rate),
        ("csll_rate", config.csll_rate),
        ("iss_rate", config.iss_rate),
        (
            "irpj_surtax_annual_threshold",
            config.irpj_surtax_annual_threshold,
        ),
        ("purchases_in_state", config.purchases_in_state),
        ("purchases_interstate", config.purchases_interstate),
        ("purchases_for_use", config.purchases_for_use),
        ("cogs", config.cogs),
        ("credit_opening_stock", config.credit_opening_stock),
        ("credit_fixed_assets", config.credit_fixed_assets),
        ("credit_industrial_energy", config.credit_industrial_energy),
        ("credit_st_inputs", config.credit_st_inputs),
        ("credit_other", config.credit_other),
        ("expense_energy", config.expense_energy),
        ("expense_rent", config.expense_rent),
        ("expense_leasing", config.expense_leasing),
        ("expense_freight", config.expense_freight),
        ("expense_depreciation", config.expense_depreciation),
        ("expense_fuel", config.expense_fuel),
        ("expense_transport_vouchers", config.expense_transport_vouchers),
        ("irpj_additions", config.irpj_additions),
        ("irpj_exclusions", config.irpj_exclusions),
    ];

    for (field, value) in non_negative {
        if value < Decimal::ZERO {
            return Err(ValidationError::Negative { field, value });
        }
    }

    let shares = [
        ("st_revenue_pct", config.st_revenue_pct),
        ("monophasic_revenue_pct", config.monophasic_revenue_pct),
        ("in_state_sales_pct", config.in_state_sales_pct),
    ];

    for (field, value) in shares {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(ValidationError::ShareOutOfRange { field, value });
        }
    }

    for item in &config.expenses {
        if item.amount < Decimal::ZERO {
            return Err(ValidationError::NegativeExpense {
                description: item.description.clone(),
                value: item.amount,
            });
        }
    }

    Ok(())
}
