use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::TaxRegime;

/// Monthly figures entered directly by a user for a regime the engine
/// does not compute (Lucro Presumido, Simples Nacional).
///
/// Natural key: (company_id, year, month, regime) — at most one row per
/// key, enforced by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualMonthlyEntry {
    pub id: i64,
    pub company_id: i64,
    pub year: i32,
    /// Calendar month, 1–12.
    pub month: u8,
    pub regime: TaxRegime,
    pub revenue: Decimal,
    pub icms: Decimal,
    pub pis: Decimal,
    pub cofins: Decimal,
    pub irpj: Decimal,
    pub csll: Decimal,
    pub iss: Decimal,
    /// Single deductible-expense figure for the month; manual regimes do
    /// not carry an itemised expense list.
    pub deductible_expenses: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// For creating new entries (no id or timestamps).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewManualMonthlyEntry {
    pub company_id: i64,
    pub year: i32,
    pub month: u8,
    pub regime: TaxRegime,
    pub revenue: Decimal,
    pub icms: Decimal,
    pub pis: Decimal,
    pub cofins: Decimal,
    pub irpj: Decimal,
    pub csll: Decimal,
    pub iss: Decimal,
    pub deductible_expenses: Decimal,
}

impl ManualMonthlyEntry {
    /// Sum of the six payable lines, each floored at zero first.
    pub fn total_taxes(&self) -> Decimal {
        [self.icms, self.pis, self.cofins, self.irpj, self.csll, self.iss]
            .into_iter()
            .map(|line| line.max(Decimal::ZERO))
            .sum()
    }

    /// Revenue minus deductible expenses and taxes; may be negative.
    pub fn net_profit(&self) -> Decimal {
        self.revenue - self.deductible_expenses - self.total_taxes()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn entry() -> ManualMonthlyEntry {
        ManualMonthlyEntry {
            id: 1,
            company_id: 7,
            year: 2025,
            month: 3,
            regime: TaxRegime::LucroPresumido,
            revenue: dec!(50000.00),
            icms: dec!(2000.00),
            pis: dec!(325.00),
            cofins: dec!(1500.00),
            irpj: dec!(1200.00),
            csll: dec!(1080.00),
            iss: dec!(0.00),
            deductible_expenses: dec!(20000.00),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn total_taxes_sums_the_six_lines() {
        assert_eq!(entry().total_taxes(), dec!(6105.00));
    }

    #[test]
    fn total_taxes_floors_negative_lines_at_zero() {
        let mut e = entry();
        e.icms = dec!(-500.00);

        assert_eq!(e.total_taxes(), dec!(4105.00));
    }

    #[test]
    fn net_profit_may_be_negative() {
        let mut e = entry();
        e.deductible_expenses = dec!(60000.00);

        assert_eq!(e.net_profit(), dec!(-16105.00));
    }
}
