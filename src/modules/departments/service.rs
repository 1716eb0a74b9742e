use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::models::Department;
use super::store::DepartmentStore;

/// Department access: thin delegation to the store.
#[derive(Clone)]
pub struct DepartmentService {
    store: Arc<dyn DepartmentStore>,
}

impl DepartmentService {
    pub fn new(store: Arc<dyn DepartmentStore>) -> Self {
        Self { store }
    }

    pub async fn count(&self) -> anyhow::Result<i64> {
        self.store.count().await
    }

    #[instrument(name = "departments.service.list_all", skip(self))]
    pub async fn list_all(&self) -> anyhow::Result<Vec<Department>> {
        let departments = self.store.find_all().await?;
        debug!(count = departments.len(), "listed departments");
        Ok(departments)
    }

    #[instrument(name = "departments.service.get_by_id", skip(self))]
    pub async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Department>> {
        self.store.find_by_id(id).await
    }

    /// Look up an optional reference; an absent id never touches the store.
    pub async fn get_by_ref(&self, id: Option<i64>) -> anyhow::Result<Option<Department>> {
        match id {
            Some(id) => self.get_by_id(id).await,
            None => Ok(None),
        }
    }

    #[instrument(
        name = "departments.service.add",
        skip(self, department),
        fields(short_name = %department.short_name)
    )]
    pub async fn add(&self, department: Department) -> anyhow::Result<Department> {
        let saved = self.store.save(department).await?;
        info!(department_id = ?saved.department_id, "department created");
        Ok(saved)
    }

    /// Replace the department stored under `id`.
    ///
    /// Returns `None` without writing when no department has that id. The id
    /// in the body is ignored in favour of `id`.
    #[instrument(name = "departments.service.update", skip(self, department))]
    pub async fn update(
        &self,
        id: i64,
        mut department: Department,
    ) -> anyhow::Result<Option<Department>> {
        if !self.store.exists_by_id(id).await? {
            warn!("update skipped: department does not exist");
            return Ok(None);
        }

        department.department_id = Some(id);
        let saved = self.store.save(department).await?;
        info!("department updated");
        Ok(Some(saved))
    }

    #[instrument(name = "departments.service.delete_by_id", skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> anyhow::Result<()> {
        self.store.delete_by_id(id).await?;
        info!("department deleted");
        Ok(())
    }
}
