//! Employee persistence: the store port and its SQLite implementation.
//!
//! Reads join the department row so callers always get the reference
//! resolved; writes store only the department's id.

use anyhow::Context;
use async_trait::async_trait;
use roster_kernel::DbPool;

use super::models::Employee;
use crate::modules::departments::models::Department;

/// Persistence operations the employee service relies on.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Insert, or replace the row with the same id. Returns the stored record.
    async fn save(&self, employee: Employee) -> anyhow::Result<Employee>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Employee>>;
    async fn find_all(&self) -> anyhow::Result<Vec<Employee>>;
    async fn exists_by_id(&self, id: i64) -> anyhow::Result<bool>;
    /// Deleting an absent id is not an error.
    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()>;
    async fn count(&self) -> anyhow::Result<i64>;
}

const SELECT_EMPLOYEE: &str = r#"
    SELECT e.employee_id, e.first_name, e.last_name,
           d.department_id, d.short_name, d.department_name
    FROM employee e
    LEFT JOIN department d ON d.department_id = e.department_id
"#;

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    employee_id: i64,
    first_name: String,
    last_name: String,
    department_id: Option<i64>,
    short_name: Option<String>,
    department_name: Option<String>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        let department = match (row.department_id, row.short_name, row.department_name) {
            (Some(id), Some(short_name), Some(department_name)) => Some(Department {
                department_id: Some(id),
                short_name,
                department_name,
            }),
            _ => None,
        };

        Employee {
            employee_id: Some(row.employee_id),
            first_name: row.first_name,
            last_name: row.last_name,
            department,
        }
    }
}

pub struct SqliteEmployeeStore {
    pool: DbPool,
}

impl SqliteEmployeeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeStore for SqliteEmployeeStore {
    async fn save(&self, employee: Employee) -> anyhow::Result<Employee> {
        let department_id = employee
            .department
            .as_ref()
            .and_then(|department| department.department_id);

        let employee_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO employee (employee_id, first_name, last_name, department_id)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (employee_id) DO UPDATE SET
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                department_id = excluded.department_id
            RETURNING employee_id
            "#,
        )
        .bind(employee.employee_id)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(department_id)
        .fetch_one(&self.pool)
        .await
        .context("save employee failed")?;

        Ok(Employee {
            employee_id: Some(employee_id),
            ..employee
        })
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "{SELECT_EMPLOYEE} WHERE e.employee_id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("find employee by id failed")?;
        Ok(row.map(Into::into))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
            "{SELECT_EMPLOYEE} ORDER BY e.employee_id"
        ))
        .fetch_all(&self.pool)
        .await
        .context("list employees failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn exists_by_id(&self, id: i64) -> anyhow::Result<bool> {
        let found: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employee WHERE employee_id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .context("employee exists check failed")?;
        Ok(found > 0)
    }

    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM employee WHERE employee_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("delete employee failed")?;
        Ok(())
    }

    async fn count(&self) -> anyhow::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM employee")
            .fetch_one(&self.pool)
            .await
            .context("count employees failed")
    }
}
