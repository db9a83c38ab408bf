//! Lecturer repository implementation
//!
//! Database access for the lecturer roster. Lecturers are never deleted;
//! deactivation is an update of `is_active`.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

const LECTURER_COLUMNS: &str = r#"
    lecturer_id,
    employee_id,
    username,
    first_name,
    last_name,
    email,
    phone,
    department,
    position,
    hire_date,
    default_hourly_rate,
    is_active,
    created_at,
    updated_at
"#;

/// Repository for the lecturer roster
#[derive(Debug, Clone)]
pub struct LecturerRepository {
    pool: PgPool,
}

impl LecturerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All lecturers, ordered by last name then first name
    pub async fn list(&self) -> Result<Vec<LecturerRow>, DatabaseError> {
        let sql = format!(
            "SELECT {LECTURER_COLUMNS} FROM lecturers ORDER BY last_name, first_name"
        );
        let rows = sqlx::query_as::<_, LecturerRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    pub async fn find_by_id(&self, lecturer_id: Uuid) -> Result<Option<LecturerRow>, DatabaseError> {
        let sql = format!("SELECT {LECTURER_COLUMNS} FROM lecturers WHERE lecturer_id = $1");
        let row = sqlx::query_as::<_, LecturerRow>(&sql)
            .bind(lecturer_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn find_by_employee_id(
        &self,
        employee_id: &str,
    ) -> Result<Option<LecturerRow>, DatabaseError> {
        let sql = format!("SELECT {LECTURER_COLUMNS} FROM lecturers WHERE employee_id = $1");
        let row = sqlx::query_as::<_, LecturerRow>(&sql)
            .bind(employee_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Inserts a lecturer
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DuplicateEntry` when the employee id or
    /// username is already taken
    pub async fn insert(&self, row: &LecturerRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO lecturers (
                lecturer_id, employee_id, username, first_name, last_name, email,
                phone, department, position, hire_date, default_hourly_rate,
                is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(row.lecturer_id)
        .bind(&row.employee_id)
        .bind(&row.username)
        .bind(&row.first_name)
        .bind(&row.last_name)
        .bind(&row.email)
        .bind(&row.phone)
        .bind(&row.department)
        .bind(&row.position)
        .bind(row.hire_date)
        .bind(row.default_hourly_rate)
        .bind(row.is_active)
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        Ok(())
    }

    /// Overwrites the mutable columns of an existing lecturer
    pub async fn update(&self, row: &LecturerRow) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE lecturers
            SET first_name = $2, last_name = $3, email = $4, phone = $5,
                department = $6, position = $7, default_hourly_rate = $8,
                is_active = $9, updated_at = $10
            WHERE lecturer_id = $1
            "#,
        )
        .bind(row.lecturer_id)
        .bind(&row.first_name)
        .bind(&row.last_name)
        .bind(&row.email)
        .bind(&row.phone)
        .bind(&row.department)
        .bind(&row.position)
        .bind(row.default_hourly_rate)
        .bind(row.is_active)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Lecturer", row.lecturer_id));
        }
        Ok(())
    }
}

/// Database row for a lecturer
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LecturerRow {
    pub lecturer_id: Uuid,
    pub employee_id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub hire_date: NaiveDate,
    pub default_hourly_rate: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
