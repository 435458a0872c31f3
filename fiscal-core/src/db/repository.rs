use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    ManualMonthlyEntry, NewManualMonthlyEntry, NewScenario, Scenario, TaxRegime,
};

#[derive(Debug, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Entry already exists for company {company_id}, {year}-{month:02}, {regime}")]
    DuplicateEntry {
        company_id: i64,
        year: i32,
        month: u8,
        regime: TaxRegime,
    },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

#[async_trait]
pub trait FiscalRepository: Send + Sync {
    // Scenarios
    async fn create_scenario(&self, scenario: NewScenario) -> Result<Scenario, RepositoryError>;

    async fn get_scenario(&self, id: i64) -> Result<Scenario, RepositoryError>;

    async fn update_scenario(&self, scenario: &Scenario) -> Result<(), RepositoryError>;

    async fn delete_scenario(&self, id: i64) -> Result<(), RepositoryError>;

    async fn list_scenarios(
        &self,
        company_id: i64,
        year: Option<i32>,
    ) -> Result<Vec<Scenario>, RepositoryError>;

    // Manual monthly entries (natural key: company, year, month, regime)
    async fn create_manual_entry(
        &self,
        entry: NewManualMonthlyEntry,
    ) -> Result<ManualMonthlyEntry, RepositoryError>;

    async fn get_manual_entry(
        &self,
        company_id: i64,
        year: i32,
        month: u8,
        regime: TaxRegime,
    ) -> Result<ManualMonthlyEntry, RepositoryError>;

    async fn update_manual_entry(
        &self,
        entry: &ManualMonthlyEntry,
    ) -> Result<(), RepositoryError>;

    async fn delete_manual_entry(&self, id: i64) -> Result<(), RepositoryError>;

    async fn list_manual_entries(
        &self,
        company_id: i64,
        year: i32,
        regime: Option<TaxRegime>,
    ) -> Result<Vec<ManualMonthlyEntry>, RepositoryError>;
}
