mod manual_entry;
mod regime;
mod scenario;
mod tax_config;
mod tax_result;

pub use manual_entry::{ManualMonthlyEntry, NewManualMonthlyEntry};
pub use regime::TaxRegime;
pub use scenario::{NewScenario, PeriodKind, Scenario};
pub use tax_config::{CreditEligibility, ExpenseItem, ExpenseKind, TaxConfig};
pub use tax_result::TaxResult;
