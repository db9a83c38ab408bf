//! Payment report repository implementation
//!
//! Reports are stored exactly as generated. Their lines are kept in a JSONB
//! column so a stored report can be re-exported without re-reading claims.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

const REPORT_COLUMNS: &str = r#"
    report_id,
    name,
    generated_at,
    period_start,
    period_end,
    total_amount,
    currency,
    total_claims,
    generated_by,
    lines
"#;

/// Repository for generated payment reports
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, row: &ReportRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO payment_reports (
                report_id, name, generated_at, period_start, period_end,
                total_amount, currency, total_claims, generated_by, lines
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(row.report_id)
        .bind(&row.name)
        .bind(row.generated_at)
        .bind(row.period_start)
        .bind(row.period_end)
        .bind(row.total_amount)
        .bind(&row.currency)
        .bind(row.total_claims)
        .bind(&row.generated_by)
        .bind(&row.lines)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        Ok(())
    }

    /// All reports, newest first
    pub async fn list(&self) -> Result<Vec<ReportRow>, DatabaseError> {
        let sql = format!("SELECT {REPORT_COLUMNS} FROM payment_reports ORDER BY generated_at DESC");
        let rows = sqlx::query_as::<_, ReportRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    pub async fn find_by_id(&self, report_id: Uuid) -> Result<Option<ReportRow>, DatabaseError> {
        let sql = format!("SELECT {REPORT_COLUMNS} FROM payment_reports WHERE report_id = $1");
        let row = sqlx::query_as::<_, ReportRow>(&sql)
            .bind(report_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }
}

/// Database row for a payment report
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReportRow {
    pub report_id: Uuid,
    pub name: String,
    pub generated_at: DateTime<Utc>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total_amount: Decimal,
    pub currency: String,
    pub total_claims: i32,
    pub generated_by: String,
    /// Report lines as JSON
    pub lines: Json<serde_json::Value>,
}
