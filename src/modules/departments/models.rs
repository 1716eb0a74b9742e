use serde::{Deserialize, Serialize};

/// A department record.
///
/// `department_id` is absent only on inbound bodies that let the store
/// assign one; every department read back from the store carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    #[serde(default)]
    pub department_id: Option<i64>,
    /// Short label, e.g. `ENG`
    pub short_name: String,
    /// Display name, e.g. `Engineering`
    pub department_name: String,
}

impl Department {
    pub fn new(short_name: impl Into<String>, department_name: impl Into<String>) -> Self {
        Self {
            department_id: None,
            short_name: short_name.into(),
            department_name: department_name.into(),
        }
    }
}
