//! Cross-regime comparison over a selection of months in one year.
//!
//! Lucro Real figures come from computed scenario results; Lucro
//! Presumido and Simples Nacional figures come from manual monthly
//! entries. The engine normalises both into [`MonthlyFigures`], reports
//! coverage honestly, and never fails: missing data degrades the answer,
//! it does not error.

pub mod insights;
pub mod metrics;
pub mod variance;

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::ratio_pct;
use crate::models::{ManualMonthlyEntry, PeriodKind, Scenario, TaxRegime};

pub use insights::{generate as generate_insights, Insight, Severity, MAX_INSIGHTS};
pub use metrics::{MonthlyFigures, RegimeMetrics};
pub use variance::{variances, Metric, MetricVariance, RegimeVariance};

/// Monthly figures for one regime, keyed by calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeData {
    pub regime: TaxRegime,
    pub months: BTreeMap<u8, MonthlyFigures>,
}

impl RegimeData {
    /// Lucro Real data from computed monthly scenarios. Only scenarios
    /// for the given year with a month and a stored result contribute;
    /// when a month has several, the last one in iteration order wins.
    pub fn from_scenarios(
        year: i32,
        scenarios: &[Scenario],
    ) -> Self {
        let months = scenarios
            .iter()
            .filter(|s| s.year == year && s.period == PeriodKind::Month)
            .filter_map(|s| {
                let month = s.month?;
                let result = s.result.as_ref()?;
                Some((month, MonthlyFigures::from(result)))
            })
            .collect();

        Self {
            regime: TaxRegime::LucroReal,
            months,
        }
    }

    /// Manual data for one regime. Entries for other regimes or years
    /// are ignored.
    pub fn from_manual_entries(
        regime: TaxRegime,
        year: i32,
        entries: &[ManualMonthlyEntry],
    ) -> Self {
        let months = entries
            .iter()
            .filter(|e| e.regime == regime && e.year == year)
            .map(|e| (e.month, MonthlyFigures::from(e)))
            .collect();

        Self { regime, months }
    }

    fn covered(
        &self,
        selected: &[u8],
    ) -> Vec<u8> {
        selected
            .iter()
            .copied()
            .filter(|m| self.months.contains_key(m))
            .collect()
    }
}

/// What to compare: a year, the months of interest, and the regimes in
/// selection order. The first regime is the baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub year: i32,
    /// Calendar months, 1–12, in selection order.
    pub months: Vec<u8>,
    pub regimes: Vec<RegimeData>,
}

/// How completely one regime covers the selected months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeCoverage {
    pub regime: TaxRegime,
    pub months_present: Vec<u8>,
    pub months_missing: Vec<u8>,
    pub complete: bool,
}

/// The full comparison report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparativeAnalysis {
    pub year: i32,
    pub selected_months: Vec<u8>,
    /// False when fewer than two regimes have any figures for the
    /// selected months; everything below is then empty.
    pub has_data: bool,
    pub coverage: Vec<RegimeCoverage>,
    /// Selected months covered by every regime that has data at all.
    pub months_with_data: Vec<u8>,
    /// `months_with_data` over `selected_months`, as a percentage.
    pub percent_coverage: Decimal,
    pub incomplete_regimes: Vec<TaxRegime>,
    pub metrics: Vec<RegimeMetrics>,
    pub variances: Vec<RegimeVariance>,
    pub insights: Vec<Insight>,
}

/// Runs the comparison. Never errors: incomplete or absent data shows up
/// in the coverage fields and in `has_data`, not as a failure.
pub fn compare(request: &ComparisonRequest) -> ComparativeAnalysis {
    let coverage: Vec<RegimeCoverage> = request
        .regimes
        .iter()
        .map(|data| {
            let months_present = data.covered(&request.months);
            let months_missing: Vec<u8> = request
                .months
                .iter()
                .copied()
                .filter(|m| !months_present.contains(m))
                .collect();
            RegimeCoverage {
                regime: data.regime,
                complete: months_missing.is_empty(),
                months_present,
                months_missing,
            }
        })
        .collect();

    let with_data: Vec<&RegimeData> = request
        .regimes
        .iter()
        .filter(|data| !data.covered(&request.months).is_empty())
        .collect();

    if with_data.len() < 2 {
        tracing::debug!(
            year = request.year,
            regimes_with_data = with_data.len(),
            "comparison has too little data"
        );
        return ComparativeAnalysis {
            year: request.year,
            selected_months: request.months.clone(),
            has_data: false,
            coverage,
            months_with_data: Vec::new(),
            percent_coverage: Decimal::ZERO,
            incomplete_regimes: Vec::new(),
            metrics: Vec::new(),
            variances: Vec::new(),
            insights: Vec::new(),
        };
    }

    let months_with_data: Vec<u8> = request
        .months
        .iter()
        .copied()
        .filter(|m| with_data.iter().all(|data| data.months.contains_key(m)))
        .collect();

    let percent_coverage = ratio_pct(
        Decimal::from(months_with_data.len() as u64),
        Decimal::from(request.months.len() as u64),
    );

    let incomplete_regimes: Vec<TaxRegime> = coverage
        .iter()
        .filter(|c| !c.complete)
        .map(|c| c.regime)
        .collect();

    let metrics: Vec<RegimeMetrics> = with_data
        .iter()
        .filter_map(|data| {
            let figures: Vec<&MonthlyFigures> = request
                .months
                .iter()
                .filter_map(|m| data.months.get(m))
                .collect();
            RegimeMetrics::aggregate(data.regime, figures.into_iter())
        })
        .collect();

    let variances = variance::variances(&metrics);
    let insights = insights::generate(&variances);

    tracing::debug!(
        year = request.year,
        regimes = metrics.len(),
        coverage_pct = %percent_coverage,
        insights = insights.len(),
        "comparison computed"
    );

    ComparativeAnalysis {
        year: request.year,
        selected_months: request.months.clone(),
        has_data: true,
        coverage,
        months_with_data,
        percent_coverage,
        incomplete_regimes,
        metrics,
        variances,
        insights,
    }
}
