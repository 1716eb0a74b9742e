//! Department persistence: the store port and its SQLite implementation.

use anyhow::Context;
use async_trait::async_trait;
use roster_kernel::DbPool;

use super::models::Department;

/// Persistence operations the department service relies on.
#[async_trait]
pub trait DepartmentStore: Send + Sync {
    /// Insert, or replace the row with the same id. Returns the stored record.
    async fn save(&self, department: Department) -> anyhow::Result<Department>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Department>>;
    async fn find_all(&self) -> anyhow::Result<Vec<Department>>;
    async fn exists_by_id(&self, id: i64) -> anyhow::Result<bool>;
    /// Deleting an absent id is not an error.
    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()>;
    async fn count(&self) -> anyhow::Result<i64>;
}

pub struct SqliteDepartmentStore {
    pool: DbPool,
}

impl SqliteDepartmentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DepartmentStore for SqliteDepartmentStore {
    async fn save(&self, department: Department) -> anyhow::Result<Department> {
        sqlx::query_as::<_, Department>(
            r#"
            INSERT INTO department (department_id, short_name, department_name)
            VALUES (?, ?, ?)
            ON CONFLICT (department_id) DO UPDATE SET
                short_name = excluded.short_name,
                department_name = excluded.department_name
            RETURNING department_id, short_name, department_name
            "#,
        )
        .bind(department.department_id)
        .bind(&department.short_name)
        .bind(&department.department_name)
        .fetch_one(&self.pool)
        .await
        .context("save department failed")
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Department>> {
        sqlx::query_as::<_, Department>(
            "SELECT department_id, short_name, department_name FROM department WHERE department_id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("find department by id failed")
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Department>> {
        sqlx::query_as::<_, Department>(
            "SELECT department_id, short_name, department_name FROM department ORDER BY department_id",
        )
        .fetch_all(&self.pool)
        .await
        .context("list departments failed")
    }

    async fn exists_by_id(&self, id: i64) -> anyhow::Result<bool> {
        let found: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM department WHERE department_id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .context("department exists check failed")?;
        Ok(found > 0)
    }

    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM department WHERE department_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("delete department failed")?;
        Ok(())
    }

    async fn count(&self) -> anyhow::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM department")
            .fetch_one(&self.pool)
            .await
            .context("count departments failed")
    }
}
