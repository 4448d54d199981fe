//! Employee persistence.
//!
//! [`EmployeeStore`] is the seam between the lifecycle service and the
//! database. [`EmployeeRepository`] implements it on SQLite; every
//! statement lives here, and rows are mapped to [`Employee`] by hand in
//! [`employee_from_row`].

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::model::Employee;

/// Record store operations the lifecycle service depends on.
#[async_trait]
pub trait EmployeeStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>, sqlx::Error>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, sqlx::Error>;

    /// All rows, ordered by id ascending.
    async fn find_all(&self) -> Result<Vec<Employee>, sqlx::Error>;

    /// Insert a new row. The id on `employee` is ignored; the returned
    /// value carries the generated one.
    async fn insert(&self, employee: &Employee) -> Result<Employee, sqlx::Error>;

    /// Overwrite name and email of row `id`.
    /// Returns `None` when no such row exists; nothing is inserted.
    async fn update(&self, id: i64, employee: &Employee) -> Result<Option<Employee>, sqlx::Error>;

    /// Returns the number of rows removed (0 or 1).
    async fn delete_by_id(&self, id: i64) -> Result<u64, sqlx::Error>;

    async fn count(&self) -> Result<i64, sqlx::Error>;
}

/// SQLite-backed [`EmployeeStore`].
#[derive(Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

const SELECT_COLUMNS: &str = "SELECT id, first_name, last_name, email FROM employees";

impl EmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// First employee (lowest id) with the given names, bound with
    /// anonymous positional parameters.
    pub async fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let sql = format!(
            "{SELECT_COLUMNS} WHERE first_name = ? AND last_name = ? ORDER BY id ASC LIMIT 1"
        );

        let row = sqlx::query(&sql)
            .bind(first_name)
            .bind(last_name)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(employee_from_row).transpose()
    }

    /// Same lookup as [`find_by_name`](Self::find_by_name) using numbered
    /// parameters; `?2` is referenced before `?1` so binding follows the
    /// parameter index, not its position in the statement.
    pub async fn find_by_name_indexed(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let sql = format!(
            "{SELECT_COLUMNS} WHERE last_name = ?2 AND first_name = ?1 ORDER BY id ASC LIMIT 1"
        );

        let row = sqlx::query(&sql)
            .bind(first_name)
            .bind(last_name)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(employee_from_row).transpose()
    }

    /// Remove every row. Returns the number deleted.
    pub async fn delete_all(&self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM employees")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl EmployeeStore for EmployeeRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>, sqlx::Error> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?");

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(employee_from_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, sqlx::Error> {
        let sql = format!("{SELECT_COLUMNS} WHERE email = ?");

        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(employee_from_row).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Employee>, sqlx::Error> {
        let sql = format!("{SELECT_COLUMNS} ORDER BY id ASC");

        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        rows.iter().map(employee_from_row).collect()
    }

    async fn insert(&self, employee: &Employee) -> Result<Employee, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO employees (first_name, last_name, email) VALUES (?, ?, ?)",
        )
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.email)
        .execute(&self.pool)
        .await?;

        Ok(Employee {
            id: Some(result.last_insert_rowid()),
            ..employee.clone()
        })
    }

    async fn update(&self, id: i64, employee: &Employee) -> Result<Option<Employee>, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE employees SET first_name = ?, last_name = ?, email = ? WHERE id = ?",
        )
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.email)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(Employee {
            id: Some(id),
            ..employee.clone()
        }))
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<i64, sqlx::Error> {
        let row = sqlx::query("SELECT COUNT(*) AS cnt FROM employees")
            .fetch_one(&self.pool)
            .await?;

        row.try_get("cnt")
    }
}

/// Map one `employees` row onto an [`Employee`].
pub fn employee_from_row(row: &SqliteRow) -> Result<Employee, sqlx::Error> {
    Ok(Employee {
        id: Some(row.try_get("id")?),
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
    })
}
