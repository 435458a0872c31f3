use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fiscal_core::{
    FiscalRepository, ManualMonthlyEntry, NewManualMonthlyEntry, NewScenario, PeriodKind,
    RepositoryError, Scenario, TaxConfig, TaxRegime, TaxResult,
};
use sqlx::{sqlite::SqlitePool, Row};

use crate::decimal::{decimal_to_f64, get_decimal};

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn db_err(e: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

fn get_month(row: &sqlx::sqlite::SqliteRow) -> Result<Option<u8>, RepositoryError> {
    let month: Option<i64> = row.try_get("month").map_err(db_err)?;
    month
        .map(|m| u8::try_from(m).map_err(|_| db_err(format!("Invalid month value: {}", m))))
        .transpose()
}

fn row_to_scenario(row: &sqlx::sqlite::SqliteRow) -> Result<Scenario, RepositoryError> {
    let period_str: String = row.try_get("period").map_err(db_err)?;
    let period = PeriodKind::parse(&period_str)
        .ok_or_else(|| db_err(format!("Invalid period: {}", period_str)))?;

    let config_json: String = row.try_get("config").map_err(db_err)?;
    let config: TaxConfig = serde_json::from_str(&config_json).map_err(db_err)?;

    let result_json: Option<String> = row.try_get("result").map_err(db_err)?;
    let result: Option<TaxResult> = result_json
        .as_deref()
        .map(serde_json::from_str)
        .transpose()
        .map_err(db_err)?;

    Ok(Scenario {
        id: row.try_get("id").map_err(db_err)?,
        company_id: row.try_get("company_id").map_err(db_err)?,
        name: row.try_get("name").map_err(db_err)?,
        period,
        year: row.try_get("year").map_err(db_err)?,
        month: get_month(row)?,
        config,
        result,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(db_err)?,
        updated_at: row
            .try_get::<DateTime<Utc>, _>("updated_at")
            .map_err(db_err)?,
    })
}

fn row_to_manual_entry(row: &sqlx::sqlite::SqliteRow) -> Result<ManualMonthlyEntry, RepositoryError> {
    let regime_str: String = row.try_get("regime").map_err(db_err)?;
    let regime = TaxRegime::parse(&regime_str)
        .ok_or_else(|| db_err(format!("Invalid regime: {}", regime_str)))?;

    let month: i64 = row.try_get("month").map_err(db_err)?;
    let month =
        u8::try_from(month).map_err(|_| db_err(format!("Invalid month value: {}", month)))?;

    Ok(ManualMonthlyEntry {
        id: row.try_get("id").map_err(db_err)?,
        company_id: row.try_get("company_id").map_err(db_err)?,
        year: row.try_get("year").map_err(db_err)?,
        month,
        regime,
        revenue: get_decimal(row, "revenue")?,
        icms: get_decimal(row, "icms")?,
        pis: get_decimal(row, "pis")?,
        cofins: get_decimal(row, "cofins")?,
        irpj: get_decimal(row, "irpj")?,
        csll: get_decimal(row, "csll")?,
        iss: get_decimal(row, "iss")?,
        deductible_expenses: get_decimal(row, "deductible_expenses")?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(db_err)?,
        updated_at: row
            .try_get::<DateTime<Utc>, _>("updated_at")
            .map_err(db_err)?,
    })
}

/// The natural key of a manual entry is unique; a violated constraint
/// surfaces as [`RepositoryError::DuplicateEntry`].
fn map_manual_entry_error(
    e: sqlx::Error,
    company_id: i64,
    year: i32,
    month: u8,
    regime: TaxRegime,
) -> RepositoryError {
    if e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
    {
        RepositoryError::DuplicateEntry {
            company_id,
            year,
            month,
            regime,
        }
    } else {
        db_err(e)
    }
}

const MANUAL_ENTRY_COLUMNS: &str =
    "id, company_id, year, month, regime, revenue, icms, pis, cofins,
     irpj, csll, iss, deductible_expenses, created_at, updated_at";

#[async_trait]
impl FiscalRepository for SqliteRepository {
    async fn create_scenario(
        &self,
        scenario: NewScenario,
    ) -> Result<Scenario, RepositoryError> {
        let now = Utc::now();
        let config_json = serde_json::to_string(&scenario.config).map_err(db_err)?;

        let result = sqlx::query(
            "INSERT INTO scenarios (company_id, name, period, year, month, config, result,
                                    created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, NULL, ?, ?)",
        )
        .bind(scenario.company_id)
        .bind(&scenario.name)
        .bind(scenario.period.as_str())
        .bind(scenario.year)
        .bind(scenario.month.map(i64::from))
        .bind(&config_json)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        let id = result.last_insert_rowid();
        tracing::debug!(id, company_id = scenario.company_id, "scenario created");
        self.get_scenario(id).await
    }

    async fn get_scenario(
        &self,
        id: i64,
    ) -> Result<Scenario, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, company_id, name, period, year, month, config, result,
                    created_at, updated_at
             FROM scenarios WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?
        .ok_or(RepositoryError::NotFound)?;

        row_to_scenario(&row)
    }

    async fn update_scenario(
        &self,
        scenario: &Scenario,
    ) -> Result<(), RepositoryError> {
        let now = Utc::now();
        let config_json = serde_json::to_string(&scenario.config).map_err(db_err)?;
        let result_json = scenario
            .result
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(db_err)?;

        let result = sqlx::query(
            "UPDATE scenarios SET
                company_id = ?, name = ?, period = ?, year = ?, month = ?,
                config = ?, result = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(scenario.company_id)
        .bind(&scenario.name)
        .bind(scenario.period.as_str())
        .bind(scenario.year)
        .bind(scenario.month.map(i64::from))
        .bind(&config_json)
        .bind(result_json)
        .bind(now)
        .bind(scenario.id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_scenario(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM scenarios WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn list_scenarios(
        &self,
        company_id: i64,
        year: Option<i32>,
    ) -> Result<Vec<Scenario>, RepositoryError> {
        const BASE_QUERY: &str =
            "SELECT id, company_id, name, period, year, month, config, result,
                    created_at, updated_at
             FROM scenarios WHERE company_id = ?";

        let rows = match year {
            Some(year) => {
                sqlx::query(&format!(
                    "{} AND year = ? ORDER BY updated_at DESC",
                    BASE_QUERY
                ))
                .bind(company_id)
                .bind(year)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(&format!("{} ORDER BY updated_at DESC", BASE_QUERY))
                    .bind(company_id)
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(db_err)?;

        rows.iter().map(row_to_scenario).collect()
    }

    async fn create_manual_entry(
        &self,
        entry: NewManualMonthlyEntry,
    ) -> Result<ManualMonthlyEntry, RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO manual_monthly_entries (
                company_id, year, month, regime, revenue, icms, pis, cofins,
                irpj, csll, iss, deductible_expenses, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(entry.company_id)
        .bind(entry.year)
        .bind(i64::from(entry.month))
        .bind(entry.regime.as_str())
        .bind(decimal_to_f64(entry.revenue))
        .bind(decimal_to_f64(entry.icms))
        .bind(decimal_to_f64(entry.pis))
        .bind(decimal_to_f64(entry.cofins))
        .bind(decimal_to_f64(entry.irpj))
        .bind(decimal_to_f64(entry.csll))
        .bind(decimal_to_f64(entry.iss))
        .bind(decimal_to_f64(entry.deductible_expenses))
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_manual_entry_error(e, entry.company_id, entry.year, entry.month, entry.regime)
        })?;

        let id = result.last_insert_rowid();

        let row = sqlx::query(&format!(
            "SELECT {} FROM manual_monthly_entries WHERE id = ?",
            MANUAL_ENTRY_COLUMNS
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        row_to_manual_entry(&row)
    }

    async fn get_manual_entry(
        &self,
        company_id: i64,
        year: i32,
        month: u8,
        regime: TaxRegime,
    ) -> Result<ManualMonthlyEntry, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM manual_monthly_entries
             WHERE company_id = ? AND year = ? AND month = ? AND regime = ?",
            MANUAL_ENTRY_COLUMNS
        ))
        .bind(company_id)
        .bind(year)
        .bind(i64::from(month))
        .bind(regime.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?
        .ok_or(RepositoryError::NotFound)?;

        row_to_manual_entry(&row)
    }

    async fn update_manual_entry(
        &self,
        entry: &ManualMonthlyEntry,
    ) -> Result<(), RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE manual_monthly_entries SET
                company_id = ?, year = ?, month = ?, regime = ?, revenue = ?,
                icms = ?, pis = ?, cofins = ?, irpj = ?, csll = ?, iss = ?,
                deductible_expenses = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(entry.company_id)
        .bind(entry.year)
        .bind(i64::from(entry.month))
        .bind(entry.regime.as_str())
        .bind(decimal_to_f64(entry.revenue))
        .bind(decimal_to_f64(entry.icms))
        .bind(decimal_to_f64(entry.pis))
        .bind(decimal_to_f64(entry.cofins))
        .bind(decimal_to_f64(entry.irpj))
        .bind(decimal_to_f64(entry.csll))
        .bind(decimal_to_f64(entry.iss))
        .bind(decimal_to_f64(entry.deductible_expenses))
        .bind(now)
        .bind(entry.id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_manual_entry_error(e, entry.company_id, entry.year, entry.month, entry.regime)
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_manual_entry(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM manual_monthly_entries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn list_manual_entries(
        &self,
        company_id: i64,
        year: i32,
        regime: Option<TaxRegime>,
    ) -> Result<Vec<ManualMonthlyEntry>, RepositoryError> {
        let base_query = format!(
            "SELECT {} FROM manual_monthly_entries WHERE company_id = ? AND year = ?",
            MANUAL_ENTRY_COLUMNS
        );

        let rows = match regime {
            Some(regime) => {
                sqlx::query(&format!("{} AND regime = ? ORDER BY month", base_query))
                    .bind(company_id)
                    .bind(year)
                    .bind(regime.as_str())
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                sqlx::query(&format!("{} ORDER BY regime, month", base_query))
                    .bind(company_id)
                    .bind(year)
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(db_err)?;

        rows.iter().map(row_to_manual_entry).collect()
    }
}
