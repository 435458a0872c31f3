use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{TaxConfig, TaxResult};

/// Reporting period a computation covers. The IRPJ surtax threshold is
/// pro-rated linearly: one twelfth of the annual exemption per month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodKind {
    Month,
    Quarter,
    Semester,
    Year,
}

impl PeriodKind {
    pub fn months(&self) -> u32 {
        match self {
            Self::Month => 1,
            Self::Quarter => 3,
            Self::Semester => 6,
            Self::Year => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Semester => "semester",
            Self::Year => "year",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "month" => Some(Self::Month),
            "quarter" => Some(Self::Quarter),
            "semester" => Some(Self::Semester),
            "year" => Some(Self::Year),
            _ => None,
        }
    }
}

/// Persisted snapshot pairing one configuration with the result it
/// produced, tied to a company and a period.
///
/// The result is replaced only through [`Scenario::recalculate`]; editing
/// the config never recomputes silently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: i64,
    pub company_id: i64,
    pub name: String,
    pub period: PeriodKind,
    pub year: i32,
    /// Set when `period` is `Month` (1–12).
    pub month: Option<u8>,
    pub config: TaxConfig,
    pub result: Option<TaxResult>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// For creating new scenarios (no id, result, or timestamps).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewScenario {
    pub company_id: i64,
    pub name: String,
    pub period: PeriodKind,
    pub year: i32,
    pub month: Option<u8>,
    pub config: TaxConfig,
}

impl Scenario {
    /// Recompute the result from the current config. This is the only
    /// path that replaces `result`.
    pub fn recalculate(&mut self) -> Result<&TaxResult, crate::calculations::ValidationError> {
        let result = crate::calculations::calculate(&self.config, self.period)?;
        Ok(self.result.insert(result))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn period_kind_months() {
        assert_eq!(PeriodKind::Month.months(), 1);
        assert_eq!(PeriodKind::Quarter.months(), 3);
        assert_eq!(PeriodKind::Semester.months(), 6);
        assert_eq!(PeriodKind::Year.months(), 12);
    }

    #[test]
    fn period_kind_codes_round_trip() {
        for period in [
            PeriodKind::Month,
            PeriodKind::Quarter,
            PeriodKind::Semester,
            PeriodKind::Year,
        ] {
            assert_eq!(PeriodKind::parse(period.as_str()), Some(period));
        }
        assert_eq!(PeriodKind::parse("fortnight"), None);
    }

    #[test]
    fn recalculate_replaces_the_result() {
        let mut scenario = Scenario {
            id: 1,
            company_id: 1,
            name: "base case".to_string(),
            period: PeriodKind::Year,
            year: 2025,
            month: None,
            config: TaxConfig {
                revenue: dec!(100000.00),
                ..TaxConfig::default()
            },
            result: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let first = scenario.recalculate().expect("valid config").clone();
        assert_eq!(scenario.result.as_ref(), Some(&first));

        scenario.config.revenue = dec!(200000.00);
        // Editing the config alone never touches the stored result.
        assert_eq!(scenario.result.as_ref(), Some(&first));

        let second = scenario.recalculate().expect("valid config").clone();
        assert!(second.total_taxes > first.total_taxes);
    }
}
