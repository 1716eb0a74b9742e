use serde::{Deserialize, Serialize};

use crate::modules::departments::models::Department;

/// An employee record with its department, if any, resolved eagerly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(rename = "employeeID", default)]
    pub employee_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    /// Shared reference; employees never own the department's lifecycle.
    #[serde(default)]
    pub department: Option<Department>,
}

/// Wire shape accepted by employee create and update.
///
/// Never persisted as-is; see [`super::resolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    #[serde(rename = "employeeID", default)]
    pub employee_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub department_id: Option<i64>,
}
