//! Tax aggregator: the engine entry point that validates a config, runs
//! the four calculators and assembles one flat [`TaxResult`].
//!
//! The computation is pure and synchronous over the config snapshot; two
//! calls with the same inputs produce bit-identical results.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::ratio_pct;
use crate::calculations::{icms, irpj_csll, iss, pis_cofins, validate, ValidationError};
use crate::models::{PeriodKind, TaxConfig, TaxResult};

/// Computes the full Lucro Real result for one period.
///
/// # Errors
///
/// Returns [`ValidationError`] when the config violates the input
/// contract (negative amounts, out-of-range shares). No result is
/// produced from invalid input.
pub fn calculate(
    config: &TaxConfig,
    period: PeriodKind,
) -> Result<TaxResult, ValidationError> {
    validate(config)?;

    let icms = icms::calculate(config);
    let contributions = pis_cofins::calculate(config);
    let profit = irpj_csll::calculate(config, period);
    let iss = iss::calculate(config);

    let federal_taxes = contributions.pis.payable
        + contributions.cofins.payable
        + profit.irpj_payable
        + profit.csll_payable;
    let state_taxes = icms.payable;
    let municipal_taxes = iss.payable;
    let total_taxes = federal_taxes + state_taxes + municipal_taxes;

    let net_profit = config.revenue - config.cogs - profit.operating_expenses - total_taxes;

    debug!(
        period = period.as_str(),
        %total_taxes,
        %net_profit,
        "computed lucro real result"
    );

    Ok(TaxResult {
        period,
        revenue: config.revenue,

        icms_base: icms.base,
        icms_rate: icms.rate,
        icms_debit: icms.debit,
        icms_credit: icms.credit,
        icms_payable: icms.payable,
        icms_carry_forward: icms.carry_forward,

        pis_base: contributions.pis.base,
        pis_rate: contributions.pis.rate,
        pis_debit: contributions.pis.debit,
        pis_credit: contributions.pis.credit,
        pis_payable: contributions.pis.payable,
        pis_carry_forward: contributions.pis.carry_forward,

        cofins_base: contributions.cofins.base,
        cofins_rate: contributions.cofins.rate,
        cofins_debit: contributions.cofins.debit,
        cofins_credit: contributions.cofins.credit,
        cofins_payable: contributions.cofins.payable,
        cofins_carry_forward: contributions.cofins.carry_forward,

        pretax_profit: profit.pretax_profit,
        taxable_profit: profit.taxable_profit,
        irpj_surtax_threshold: profit.surtax_threshold,
        irpj_rate: config.irpj_rate,
        irpj_base_tax: profit.irpj_base_tax,
        irpj_surtax: profit.irpj_surtax,
        irpj_payable: profit.irpj_payable,
        csll_rate: config.csll_rate,
        csll_payable: profit.csll_payable,

        iss_rate: iss.rate,
        iss_payable: iss.payable,

        federal_taxes,
        state_taxes,
        municipal_taxes,
        total_taxes,
        cogs: config.cogs,
        operating_expenses: profit.operating_expenses,
        net_profit,
        tax_burden_pct: ratio_pct(total_taxes, config.revenue),
        profit_margin_pct: ratio_pct(net_profit, config.revenue),
    })
}

/// Convenience check used by callers that only need to know whether a
/// config would be accepted.
pub fn is_valid(config: &TaxConfig) -> bool {
    validate(config).is_ok()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn sample_config() -> TaxConfig {
        TaxConfig {
            revenue: dec!(500000.00),
            purchases_in_state: dec!(100000.00),
            cogs: dec!(150000.00),
            ..TaxConfig::default()
        }
    }

    #[test]
    fn totals_are_the_sum_of_the_six_payables() {
        let result = calculate(&sample_config(), PeriodKind::Year).unwrap();

        assert_eq!(
            result.total_taxes,
            result.icms_payable
                + result.pis_payable
                + result.cofins_payable
                + result.irpj_payable
                + result.csll_payable
                + result.iss_payable
        );
    }

    #[test]
    fn government_level_grouping() {
        let result = calculate(&sample_config(), PeriodKind::Year).unwrap();

        assert_eq!(
            result.federal_taxes,
            result.pis_payable + result.cofins_payable + result.irpj_payable + result.csll_payable
        );
        assert_eq!(result.state_taxes, result.icms_payable);
        assert_eq!(result.municipal_taxes, result.iss_payable);
    }

    #[test]
    fn net_profit_subtracts_cogs_opex_and_taxes() {
        let result = calculate(&sample_config(), PeriodKind::Year).unwrap();

        assert_eq!(
            result.net_profit,
            result.revenue - result.cogs - result.operating_expenses - result.total_taxes
        );
    }

    #[test]
    fn identical_configs_produce_identical_results() {
        let config = sample_config();

        let a = calculate(&config, PeriodKind::Quarter).unwrap();
        let b = calculate(&config, PeriodKind::Quarter).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn zero_revenue_produces_all_zero_ratios() {
        let result = calculate(&TaxConfig::default(), PeriodKind::Year).unwrap();

        assert_eq!(result.total_taxes, dec!(0.00));
        assert_eq!(result.tax_burden_pct, dec!(0));
        assert_eq!(result.profit_margin_pct, dec!(0));
    }

    #[test]
    fn invalid_config_is_rejected_before_computing() {
        let config = TaxConfig {
            revenue: dec!(-1),
            ..TaxConfig::default()
        };

        assert!(calculate(&config, PeriodKind::Year).is_err());
        assert!(!is_valid(&config));
    }

    #[test]
    fn every_payable_is_non_negative() {
        // Credits far above debits on every ledger.
        let config = TaxConfig {
            revenue: dec!(1000.00),
            purchases_in_state: dec!(900000.00),
            cogs: dec!(500000.00),
            ..TaxConfig::default()
        };

        let result = calculate(&config, PeriodKind::Year).unwrap();

        for payable in [
            result.icms_payable,
            result.pis_payable,
            result.cofins_payable,
            result.irpj_payable,
            result.csll_payable,
            result.iss_payable,
        ] {
            assert!(payable >= dec!(0));
        }
    }
}
