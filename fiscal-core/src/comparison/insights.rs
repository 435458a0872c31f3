//! Narrative insights over the variance report.
//!
//! Rules live in a declarative table `{metric, threshold, polarity}` and
//! are evaluated uniformly, regime-major in selection order, so adding a
//! rule never means adding a branch. Output is capped at
//! [`MAX_INSIGHTS`]; when nothing qualifies a single fallback notice is
//! emitted instead.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::comparison::variance::{Metric, RegimeVariance};
use crate::models::TaxRegime;

/// Hard cap on emitted insights, regardless of regime count or delta
/// magnitude.
pub const MAX_INSIGHTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// The compared regime looks better on this metric.
    Success,
    /// The compared regime looks worse on this metric.
    Alert,
    /// A neutral caveat about the comparison itself.
    Warning,
    /// Informational only (the fallback notice).
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub severity: Severity,
    /// The compared regime; `None` for the fallback notice.
    pub regime: Option<TaxRegime>,
    pub metric: Option<Metric>,
    pub message: String,
}

/// Which direction counts as an improvement for the compared regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Polarity {
    LowerIsBetter,
    HigherIsBetter,
    /// Any difference is a caveat, not a verdict.
    Neutral,
}

/// How the threshold reads the variance: percentage of the baseline or
/// absolute percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    DeltaPct,
    DeltaPoints,
}

struct InsightRule {
    metric: Metric,
    trigger: Trigger,
    threshold: Decimal,
    polarity: Polarity,
}

/// The rule table. Order matters: rules are evaluated top to bottom for
/// each regime.
fn rules() -> [InsightRule; 3] {
    [
        InsightRule {
            metric: Metric::Revenue,
            trigger: Trigger::DeltaPct,
            threshold: Decimal::new(1, 1), // 0.1%
            polarity: Polarity::Neutral,
        },
        InsightRule {
            metric: Metric::TaxBurdenPct,
            trigger: Trigger::DeltaPoints,
            threshold: Decimal::new(5, 1), // 0.5 points
            polarity: Polarity::LowerIsBetter,
        },
        InsightRule {
            metric: Metric::ProfitMarginPct,
            trigger: Trigger::DeltaPoints,
            threshold: Decimal::new(5, 1), // 0.5 points
            polarity: Polarity::HigherIsBetter,
        },
    ]
}

/// Evaluates the rule table over every regime variance, in generation
/// order, capped at [`MAX_INSIGHTS`].
pub fn generate(variances: &[RegimeVariance]) -> Vec<Insight> {
    let mut insights = Vec::new();

    'outer: for variance in variances {
        for rule in rules() {
            if insights.len() == MAX_INSIGHTS {
                break 'outer;
            }
            if let Some(insight) = evaluate(&rule, variance) {
                insights.push(insight);
            }
        }
    }

    if insights.is_empty() && !variances.is_empty() {
        insights.push(Insight {
            severity: Severity::Info,
            regime: None,
            metric: None,
            message: "The selected regimes are too similar over these months to highlight \
                      meaningful differences."
                .to_string(),
        });
    }

    insights
}

fn evaluate(
    rule: &InsightRule,
    variance: &RegimeVariance,
) -> Option<Insight> {
    let metric = variance.metric(rule.metric)?;
    let delta = match rule.trigger {
        Trigger::DeltaPct => metric.delta_pct,
        Trigger::DeltaPoints => metric.delta_abs,
    };
    if delta.abs() <= rule.threshold {
        return None;
    }

    let regime = variance.regime.display_name();
    let baseline = variance.baseline.display_name();
    let magnitude = delta.abs().round_dp(1);

    let (severity, message) = match rule.polarity {
        Polarity::Neutral => (
            Severity::Warning,
            format!(
                "{regime} {label} differs from {baseline} by {magnitude}%; the regimes are \
                 not operating at the same scale.",
                label = rule.metric.label(),
            ),
        ),
        Polarity::LowerIsBetter => {
            let better = delta < Decimal::ZERO;
            (
                if better { Severity::Success } else { Severity::Alert },
                format!(
                    "{regime} {label} is {magnitude} percentage points {direction} than \
                     {baseline}.",
                    label = rule.metric.label(),
                    direction = if better { "lower" } else { "higher" },
                ),
            )
        }
        Polarity::HigherIsBetter => {
            let better = delta > Decimal::ZERO;
            (
                if better { Severity::Success } else { Severity::Alert },
                format!(
                    "{regime} {label} is {magnitude} percentage points {direction} than \
                     {baseline}.",
                    label = rule.metric.label(),
                    direction = if better { "higher" } else { "lower" },
                ),
            )
        }
    };

    Some(Insight {
        severity,
        regime: Some(variance.regime),
        metric: Some(rule.metric),
        message,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::comparison::variance::MetricVariance;

    use super::*;

    fn variance_with(
        regime: TaxRegime,
        revenue_delta_pct: Decimal,
        burden_delta_points: Decimal,
        margin_delta_points: Decimal,
    ) -> RegimeVariance {
        let entry = |metric, delta_abs, delta_pct| MetricVariance {
            metric,
            baseline: dec!(0),
            compared: dec!(0),
            delta_abs,
            delta_pct,
        };
        RegimeVariance {
            baseline: TaxRegime::LucroReal,
            regime,
            metrics: vec![
                entry(Metric::Revenue, dec!(0), revenue_delta_pct),
                entry(Metric::TaxBurdenPct, burden_delta_points, dec!(0)),
                entry(Metric::ProfitMarginPct, margin_delta_points, dec!(0)),
            ],
        }
    }

    #[test]
    fn higher_tax_burden_is_an_alert() {
        let variances = [variance_with(
            TaxRegime::LucroPresumido,
            dec!(0),
            dec!(3.0),
            dec!(0),
        )];

        let insights = generate(&variances);

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].severity, Severity::Alert);
        assert_eq!(insights[0].metric, Some(Metric::TaxBurdenPct));
        assert!(insights[0].message.contains("3.0 percentage points higher"));
    }

    #[test]
    fn lower_tax_burden_is_a_success() {
        let variances = [variance_with(
            TaxRegime::SimplesNacional,
            dec!(0),
            dec!(-2.0),
            dec!(0),
        )];

        let insights = generate(&variances);

        assert_eq!(insights[0].severity, Severity::Success);
        assert!(insights[0].message.contains("lower"));
    }

    #[test]
    fn higher_margin_is_a_success_lower_is_an_alert() {
        let up = generate(&[variance_with(
            TaxRegime::LucroPresumido,
            dec!(0),
            dec!(0),
            dec!(1.2),
        )]);
        let down = generate(&[variance_with(
            TaxRegime::LucroPresumido,
            dec!(0),
            dec!(0),
            dec!(-1.2),
        )]);

        assert_eq!(up[0].severity, Severity::Success);
        assert_eq!(down[0].severity, Severity::Alert);
    }

    #[test]
    fn revenue_difference_is_a_warning() {
        let variances = [variance_with(
            TaxRegime::LucroPresumido,
            dec!(5.0),
            dec!(0),
            dec!(0),
        )];

        let insights = generate(&variances);

        assert_eq!(insights[0].severity, Severity::Warning);
        assert_eq!(insights[0].metric, Some(Metric::Revenue));
    }

    #[test]
    fn deltas_at_the_threshold_do_not_fire() {
        let variances = [variance_with(
            TaxRegime::LucroPresumido,
            dec!(0.1),
            dec!(0.5),
            dec!(-0.5),
        )];

        let insights = generate(&variances);

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].severity, Severity::Info);
    }

    #[test]
    fn output_is_capped_at_five() {
        // Two regimes × three firing rules = six candidates.
        let variances = [
            variance_with(TaxRegime::LucroPresumido, dec!(9), dec!(9), dec!(9)),
            variance_with(TaxRegime::SimplesNacional, dec!(9), dec!(9), dec!(9)),
        ];

        let insights = generate(&variances);

        assert_eq!(insights.len(), MAX_INSIGHTS);
    }

    #[test]
    fn generation_order_is_regime_major() {
        let variances = [
            variance_with(TaxRegime::LucroPresumido, dec!(9), dec!(9), dec!(9)),
            variance_with(TaxRegime::SimplesNacional, dec!(9), dec!(9), dec!(9)),
        ];

        let insights = generate(&variances);

        assert!(insights[..3]
            .iter()
            .all(|i| i.regime == Some(TaxRegime::LucroPresumido)));
        assert!(insights[3..]
            .iter()
            .all(|i| i.regime == Some(TaxRegime::SimplesNacional)));
    }

    #[test]
    fn too_similar_regimes_get_exactly_one_fallback_notice() {
        let variances = [variance_with(
            TaxRegime::LucroPresumido,
            dec!(0),
            dec!(0),
            dec!(0),
        )];

        let insights = generate(&variances);

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].severity, Severity::Info);
        assert_eq!(insights[0].regime, None);
    }

    #[test]
    fn no_variances_mean_no_insights_at_all() {
        assert!(generate(&[]).is_empty());
    }
}
