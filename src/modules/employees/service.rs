use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::models::Employee;
use super::store::EmployeeStore;
use crate::modules::departments::models::Department;

/// Employee access: delegation to the store plus the department lookup.
///
/// Associations must already be resolved on employees handed to `add` and
/// `update`.
#[derive(Clone)]
pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    pub async fn count(&self) -> anyhow::Result<i64> {
        self.store.count().await
    }

    #[instrument(name = "employees.service.list_all", skip(self))]
    pub async fn list_all(&self) -> anyhow::Result<Vec<Employee>> {
        let employees = self.store.find_all().await?;
        debug!(count = employees.len(), "listed employees");
        Ok(employees)
    }

    #[instrument(name = "employees.service.get_by_id", skip(self))]
    pub async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Employee>> {
        self.store.find_by_id(id).await
    }

    /// The department of employee `id`; absent when either is missing.
    #[instrument(name = "employees.service.get_department_of", skip(self))]
    pub async fn get_department_of(&self, id: i64) -> anyhow::Result<Option<Department>> {
        Ok(self
            .store
            .find_by_id(id)
            .await?
            .and_then(|employee| employee.department))
    }

    #[instrument(
        name = "employees.service.add",
        skip(self, employee),
        fields(department_id = ?employee.department.as_ref().and_then(|d| d.department_id))
    )]
    pub async fn add(&self, employee: Employee) -> anyhow::Result<Employee> {
        let saved = self.store.save(employee).await?;
        info!(employee_id = ?saved.employee_id, "employee created");
        Ok(saved)
    }

    /// Replace the employee stored under `id`.
    ///
    /// Returns `None` without writing when no employee has that id.
    #[instrument(name = "employees.service.update", skip(self, employee))]
    pub async fn update(&self, id: i64, mut employee: Employee) -> anyhow::Result<Option<Employee>> {
        if !self.store.exists_by_id(id).await? {
            warn!("update skipped: employee does not exist");
            return Ok(None);
        }

        employee.employee_id = Some(id);
        let saved = self.store.save(employee).await?;
        info!("employee updated");
        Ok(Some(saved))
    }

    #[instrument(name = "employees.service.delete_by_id", skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> anyhow::Result<()> {
        self.store.delete_by_id(id).await?;
        info!("employee deleted");
        Ok(())
    }
}
