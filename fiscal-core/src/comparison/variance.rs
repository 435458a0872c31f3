//! Cross-regime variance: absolute and percentage deltas for a fixed
//! metric set, measured against the first regime in selection order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;
use crate::comparison::metrics::RegimeMetrics;
use crate::models::TaxRegime;

/// The metrics every regime pair is compared on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    Revenue,
    TotalTaxes,
    NetProfit,
    ProfitMarginPct,
    TaxBurdenPct,
    Icms,
    Pis,
    Cofins,
    Irpj,
    Csll,
    Iss,
}

impl Metric {
    pub const ALL: [Metric; 11] = [
        Metric::Revenue,
        Metric::TotalTaxes,
        Metric::NetProfit,
        Metric::ProfitMarginPct,
        Metric::TaxBurdenPct,
        Metric::Icms,
        Metric::Pis,
        Metric::Cofins,
        Metric::Irpj,
        Metric::Csll,
        Metric::Iss,
    ];

    pub fn of(
        &self,
        metrics: &RegimeMetrics,
    ) -> Decimal {
        match self {
            Self::Revenue => metrics.revenue,
            Self::TotalTaxes => metrics.total_taxes,
            Self::NetProfit => metrics.net_profit,
            Self::ProfitMarginPct => metrics.profit_margin_pct,
            Self::TaxBurdenPct => metrics.tax_burden_pct,
            Self::Icms => metrics.icms,
            Self::Pis => metrics.pis,
            Self::Cofins => metrics.cofins,
            Self::Irpj => metrics.irpj,
            Self::Csll => metrics.csll,
            Self::Iss => metrics.iss,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::TotalTaxes => "total taxes",
            Self::NetProfit => "net profit",
            Self::ProfitMarginPct => "profit margin",
            Self::TaxBurdenPct => "tax burden",
            Self::Icms => "ICMS",
            Self::Pis => "PIS",
            Self::Cofins => "COFINS",
            Self::Irpj => "IRPJ",
            Self::Csll => "CSLL",
            Self::Iss => "ISS",
        }
    }
}

/// One metric compared between a regime and the baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricVariance {
    pub metric: Metric,
    pub baseline: Decimal,
    pub compared: Decimal,
    /// `compared − baseline`.
    pub delta_abs: Decimal,
    /// `delta_abs / baseline × 100`, zero when the baseline is zero.
    pub delta_pct: Decimal,
}

/// All metric deltas of one regime against the baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeVariance {
    pub baseline: TaxRegime,
    pub regime: TaxRegime,
    pub metrics: Vec<MetricVariance>,
}

impl RegimeVariance {
    pub fn metric(
        &self,
        metric: Metric,
    ) -> Option<&MetricVariance> {
        self.metrics.iter().find(|m| m.metric == metric)
    }
}

/// Builds variances for every non-baseline regime, in selection order.
/// Fewer than two regimes yield no variances.
pub fn variances(metrics: &[RegimeMetrics]) -> Vec<RegimeVariance> {
    let Some((baseline, others)) = metrics.split_first() else {
        return Vec::new();
    };

    others
        .iter()
        .map(|other| RegimeVariance {
            baseline: baseline.regime,
            regime: other.regime,
            metrics: Metric::ALL
                .iter()
                .map(|metric| metric_variance(*metric, baseline, other))
                .collect(),
        })
        .collect()
}

fn metric_variance(
    metric: Metric,
    baseline: &RegimeMetrics,
    other: &RegimeMetrics,
) -> MetricVariance {
    let base = metric.of(baseline);
    let compared = metric.of(other);
    let delta_abs = compared - base;
    let delta_pct = if base == Decimal::ZERO {
        Decimal::ZERO
    } else {
        round_half_up(delta_abs / base * Decimal::ONE_HUNDRED)
    };

    MetricVariance {
        metric,
        baseline: base,
        compared,
        delta_abs,
        delta_pct,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn metrics(
        regime: TaxRegime,
        revenue: Decimal,
        total_taxes: Decimal,
    ) -> RegimeMetrics {
        RegimeMetrics {
            regime,
            revenue,
            icms: Decimal::ZERO,
            pis: Decimal::ZERO,
            cofins: Decimal::ZERO,
            irpj: Decimal::ZERO,
            csll: Decimal::ZERO,
            iss: Decimal::ZERO,
            total_taxes,
            net_profit: revenue - total_taxes,
            tax_burden_pct: crate::calculations::common::ratio_pct(total_taxes, revenue),
            profit_margin_pct: crate::calculations::common::ratio_pct(
                revenue - total_taxes,
                revenue,
            ),
        }
    }

    #[test]
    fn first_regime_in_selection_order_is_the_baseline() {
        let all = [
            metrics(TaxRegime::LucroReal, dec!(500000), dec!(80000)),
            metrics(TaxRegime::LucroPresumido, dec!(500000), dec!(95000)),
            metrics(TaxRegime::SimplesNacional, dec!(500000), dec!(60000)),
        ];

        let result = variances(&all);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].baseline, TaxRegime::LucroReal);
        assert_eq!(result[0].regime, TaxRegime::LucroPresumido);
        assert_eq!(result[1].regime, TaxRegime::SimplesNacional);
    }

    #[test]
    fn deltas_are_other_minus_baseline() {
        let all = [
            metrics(TaxRegime::LucroReal, dec!(500000), dec!(80000)),
            metrics(TaxRegime::LucroPresumido, dec!(500000), dec!(95000)),
        ];

        let result = variances(&all);
        let taxes = result[0].metric(Metric::TotalTaxes).unwrap();

        assert_eq!(taxes.delta_abs, dec!(15000));
        assert_eq!(taxes.delta_pct, dec!(18.75));

        let burden = result[0].metric(Metric::TaxBurdenPct).unwrap();
        assert_eq!(burden.delta_abs, dec!(3.00));
    }

    #[test]
    fn zero_baseline_yields_zero_delta_pct() {
        let all = [
            metrics(TaxRegime::LucroReal, dec!(0), dec!(0)),
            metrics(TaxRegime::LucroPresumido, dec!(100000), dec!(10000)),
        ];

        let result = variances(&all);
        let revenue = result[0].metric(Metric::Revenue).unwrap();

        assert_eq!(revenue.delta_abs, dec!(100000));
        assert_eq!(revenue.delta_pct, dec!(0));
    }

    #[test]
    fn every_metric_in_the_set_is_covered() {
        let all = [
            metrics(TaxRegime::LucroReal, dec!(500000), dec!(80000)),
            metrics(TaxRegime::LucroPresumido, dec!(500000), dec!(95000)),
        ];

        let result = variances(&all);

        assert_eq!(result[0].metrics.len(), Metric::ALL.len());
    }

    #[test]
    fn fewer_than_two_regimes_yield_nothing() {
        assert!(variances(&[]).is_empty());
        assert!(
            variances(&[metrics(TaxRegime::LucroReal, dec!(1), dec!(1))]).is_empty()
        );
    }
}
