use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a dynamic expense line is a cost of goods or an operating expense.
///
/// Only `Expense` items feed the IRPJ/CSLL operating-expense base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseKind {
    Cost,
    Expense,
}

impl ExpenseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cost => "cost",
            Self::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cost" => Some(Self::Cost),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

/// Whether a dynamic expense line generates PIS/COFINS credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditEligibility {
    WithCredit,
    WithoutCredit,
}

impl CreditEligibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WithCredit => "with_credit",
            Self::WithoutCredit => "without_credit",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "with_credit" => Some(Self::WithCredit),
            "without_credit" => Some(Self::WithoutCredit),
            _ => None,
        }
    }
}

/// One line of the dynamic expense list owned by a [`TaxConfig`].
///
/// The list is the single store for expense lines; nothing else persists
/// or duplicates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseItem {
    pub description: String,
    pub amount: Decimal,
    pub kind: ExpenseKind,
    pub credit: CreditEligibility,
    pub category: Option<String>,
}

/// Immutable configuration snapshot the calculators run on.
///
/// All monetary fields are in reais; every rate and revenue share is on the
/// 0–100 percentage scale (18 means 18%). The engine never reads ambient
/// state: everything a computation needs is in this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxConfig {
    pub revenue: Decimal,

    // Revenue splits (0-100).
    /// Share of revenue under ICMS tax substitution; taxed upstream, never
    /// debited in this ledger.
    pub st_revenue_pct: Decimal,
    /// Share of revenue under monophasic PIS/COFINS; excluded identically
    /// from both contribution bases.
    pub monophasic_revenue_pct: Decimal,
    /// In-state vs interstate sales split, carried with the configuration.
    pub in_state_sales_pct: Decimal,

    // Rates (0-100).
    pub icms_in_state_rate: Decimal,
    pub icms_interstate_rate: Decimal,
    pub pis_rate: Decimal,
    pub cofins_rate: Decimal,
    pub irpj_rate: Decimal,
    pub irpj_surtax_rate: Decimal,
    pub csll_rate: Decimal,
    pub iss_rate: Decimal,
    /// Annual exemption threshold for the IRPJ surtax, pro-rated by
    /// reporting period (R$240,000 = R$20,000 × 12).
    pub irpj_surtax_annual_threshold: Decimal,

    // Purchases by category.
    pub purchases_in_state: Decimal,
    pub purchases_interstate: Decimal,
    pub purchases_for_use: Decimal,

    pub cogs: Decimal,

    // Flat ICMS credit add-ons.
    pub credit_opening_stock: Decimal,
    pub credit_fixed_assets: Decimal,
    pub credit_industrial_energy: Decimal,
    pub credit_st_inputs: Decimal,
    pub credit_other: Decimal,

    // Flat credit-eligible expense categories. These feed the PIS/COFINS
    // credit base only; the IRPJ operating-expense base comes exclusively
    // from the dynamic list so nothing is counted twice.
    pub expense_energy: Decimal,
    pub expense_rent: Decimal,
    pub expense_leasing: Decimal,
    pub expense_freight: Decimal,
    pub expense_depreciation: Decimal,
    pub expense_fuel: Decimal,
    pub expense_transport_vouchers: Decimal,

    // Book-to-tax adjustments for the IRPJ/CSLL base.
    pub irpj_additions: Decimal,
    pub irpj_exclusions: Decimal,

    /// Dynamic expense list. The single owned collection; indices identify
    /// items within a config.
    pub expenses: Vec<ExpenseItem>,
}

impl TaxConfig {
    /// Sum of the three purchase categories, the PIS/COFINS purchase
    /// credit base.
    pub fn total_purchases(&self) -> Decimal {
        self.purchases_in_state + self.purchases_interstate + self.purchases_for_use
    }

    /// PIS/COFINS creditable expenses: the flat categories plus every
    /// dynamic item marked `with_credit`.
    pub fn creditable_expenses(&self) -> Decimal {
        let flat = self.expense_energy
            + self.expense_rent
            + self.expense_leasing
            + self.expense_freight
            + self.expense_depreciation
            + self.expense_fuel
            + self.expense_transport_vouchers;

        let dynamic: Decimal = self
            .expenses
            .iter()
            .filter(|item| item.credit == CreditEligibility::WithCredit)
            .map(|item| item.amount)
            .sum();

        flat + dynamic
    }

    /// IRPJ/CSLL operating-expense base: dynamic items with
    /// `kind = Expense` only. The flat categories above are deliberately
    /// excluded so legacy fields are never double-counted.
    pub fn operating_expenses(&self) -> Decimal {
        self.expenses
            .iter()
            .filter(|item| item.kind == ExpenseKind::Expense)
            .map(|item| item.amount)
            .sum()
    }
}

impl Default for TaxConfig {
    /// Zero amounts with the nominal Brazilian rates: ICMS 18%/12%,
    /// PIS 1.65%, COFINS 7.6%, IRPJ 15% + 10% surtax, CSLL 9%, ISS 5%.
    fn default() -> Self {
        Self {
            revenue: Decimal::ZERO,
            st_revenue_pct: Decimal::ZERO,
            monophasic_revenue_pct: Decimal::ZERO,
            in_state_sales_pct: Decimal::ONE_HUNDRED,
            icms_in_state_rate: Decimal::from(18),
            icms_interstate_rate: Decimal::from(12),
            pis_rate: Decimal::new(165, 2),
            cofins_rate: Decimal::new(76, 1),
            irpj_rate: Decimal::from(15),
            irpj_surtax_rate: Decimal::from(10),
            csll_rate: Decimal::from(9),
            iss_rate: Decimal::from(5),
            irpj_surtax_annual_threshold: Decimal::from(240_000),
            purchases_in_state: Decimal::ZERO,
            purchases_interstate: Decimal::ZERO,
            purchases_for_use: Decimal::ZERO,
            cogs: Decimal::ZERO,
            credit_opening_stock: Decimal::ZERO,
            credit_fixed_assets: Decimal::ZERO,
            credit_industrial_energy: Decimal::ZERO,
            credit_st_inputs: Decimal::ZERO,
            credit_other: Decimal::ZERO,
            expense_energy: Decimal::ZERO,
            expense_rent: Decimal::ZERO,
            expense_leasing: Decimal::ZERO,
            expense_freight: Decimal::ZERO,
            expense_depreciation: Decimal::ZERO,
            expense_fuel: Decimal::ZERO,
            expense_transport_vouchers: Decimal::ZERO,
            irpj_additions: Decimal::ZERO,
            irpj_exclusions: Decimal::ZERO,
            expenses: Vec::new(),
        }
    }
}
