use fiscal_core::RepositoryError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::{Row, TypeInfo, ValueRef};

/// Read a monetary column as a Decimal, accepting both INTEGER and REAL
/// SQLite storage classes. NULL reads as zero.
pub fn get_decimal(
    row: &sqlx::sqlite::SqliteRow,
    column: &str,
) -> Result<Decimal, RepositoryError> {
    let value_ref = row
        .try_get_raw(column)
        .map_err(|e| RepositoryError::Database(format!("Column '{}' not found: {}", column, e)))?;

    let type_name = value_ref.type_info().name().to_string();

    match type_name.as_str() {
        "INTEGER" => {
            let val: i64 = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!(
                    "Failed to get INTEGER from '{}': {}",
                    column, e
                ))
            })?;
            Ok(Decimal::from(val))
        }
        "REAL" => {
            let val: f64 = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!("Failed to get REAL from '{}': {}", column, e))
            })?;
            Decimal::try_from(val).map_err(|e| {
                RepositoryError::Database(format!("Failed to convert {} to Decimal: {}", val, e))
            })
        }
        "NULL" => Ok(Decimal::ZERO),
        other => Err(RepositoryError::Database(format!(
            "Unexpected type '{}' for column '{}'",
            other, column
        ))),
    }
}

/// Convert a Decimal to f64 for SQLite storage.
pub fn decimal_to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn setup_test_db() -> sqlx::sqlite::SqlitePool {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");

        sqlx::query(
            "CREATE TABLE amounts (
                id INTEGER PRIMARY KEY,
                int_value INTEGER,
                real_value REAL,
                null_value REAL,
                text_value TEXT
            )",
        )
        .execute(&pool)
        .await
        .expect("Failed to create test table");

        pool
    }

    #[tokio::test]
    async fn reads_integer_column() {
        let pool = setup_test_db().await;
        sqlx::query("INSERT INTO amounts (id, int_value) VALUES (1, 240000)")
            .execute(&pool)
            .await
            .expect("Failed to insert test data");

        let row = sqlx::query("SELECT int_value FROM amounts WHERE id = 1")
            .fetch_one(&pool)
            .await
            .expect("Failed to fetch row");

        assert_eq!(get_decimal(&row, "int_value"), Ok(dec!(240000)));
    }

    #[tokio::test]
    async fn reads_real_column() {
        let pool = setup_test_db().await;
        sqlx::query("INSERT INTO amounts (id, real_value) VALUES (1, 1650.25)")
            .execute(&pool)
            .await
            .expect("Failed to insert test data");

        let row = sqlx::query("SELECT real_value FROM amounts WHERE id = 1")
            .fetch_one(&pool)
            .await
            .expect("Failed to fetch row");

        assert_eq!(get_decimal(&row, "real_value"), Ok(dec!(1650.25)));
    }

    #[tokio::test]
    async fn null_reads_as_zero() {
        let pool = setup_test_db().await;
        sqlx::query("INSERT INTO amounts (id, null_value) VALUES (1, NULL)")
            .execute(&pool)
            .await
            .expect("Failed to insert test data");

        let row = sqlx::query("SELECT null_value FROM amounts WHERE id = 1")
            .fetch_one(&pool)
            .await
            .expect("Failed to fetch row");

        assert_eq!(get_decimal(&row, "null_value"), Ok(Decimal::ZERO));
    }

    #[tokio::test]
    async fn rejects_text_column() {
        let pool = setup_test_db().await;
        sqlx::query("INSERT INTO amounts (id, text_value) VALUES (1, 'not a number')")
            .execute(&pool)
            .await
            .expect("Failed to insert test data");

        let row = sqlx::query("SELECT text_value FROM amounts WHERE id = 1")
            .fetch_one(&pool)
            .await
            .expect("Failed to fetch row");

        assert!(get_decimal(&row, "text_value").is_err());
    }

    #[test]
    fn decimal_round_trips_through_f64() {
        assert_eq!(decimal_to_f64(dec!(123.45)), 123.45);
        assert_eq!(decimal_to_f64(dec!(-9000.00)), -9000.0);
        assert_eq!(decimal_to_f64(Decimal::ZERO), 0.0);
    }
}
