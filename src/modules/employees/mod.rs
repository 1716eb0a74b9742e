pub mod models;
pub mod resolver;
pub mod routes;
pub mod service;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use once_cell::sync::OnceCell;
use roster_kernel::{InitCtx, Migration, Module};
use serde_json::json;

use crate::modules::departments::{service::DepartmentService, store::SqliteDepartmentStore};
use service::EmployeeService;
use store::SqliteEmployeeStore;

struct Services {
    employees: EmployeeService,
    departments: DepartmentService,
}

/// Employee records, each optionally referencing a department.
pub struct EmployeesModule {
    services: OnceCell<Services>,
}

impl EmployeesModule {
    pub const fn new() -> Self {
        Self {
            services: OnceCell::new(),
        }
    }
}

impl Default for EmployeesModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for EmployeesModule {
    fn name(&self) -> &'static str {
        "employees"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let services = Services {
            employees: EmployeeService::new(Arc::new(SqliteEmployeeStore::new(ctx.db.clone()))),
            departments: DepartmentService::new(Arc::new(SqliteDepartmentStore::new(
                ctx.db.clone(),
            ))),
        };
        self.services
            .set(services)
            .map_err(|_| anyhow::anyhow!("employees module initialized twice"))?;

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "employees module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        match self.services.get() {
            Some(services) => {
                routes::router(services.employees.clone(), services.departments.clone())
            }
            None => {
                tracing::warn!(module = self.name(), "routes requested before init");
                Router::new()
            }
        }
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let not_found = json!({
            "description": "Not found",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                }
            }
        });
        let id_param = json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64" }
        }]);
        let input_body = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/EmployeeInput" }
                }
            }
        });
        let text = |description: &str| {
            json!({
                "description": description,
                "content": { "text/plain": { "schema": { "type": "string" } } }
            })
        };

        Some(json!({
            "paths": {
                "/employees/count": {
                    "get": {
                        "summary": "Count employees",
                        "tags": ["Employees"],
                        "responses": {
                            "200": {
                                "description": "Number of employees",
                                "content": {
                                    "application/json": {
                                        "schema": { "type": "integer", "format": "int64" }
                                    }
                                }
                            }
                        }
                    }
                },
                "/employees": {
                    "get": {
                        "summary": "List employees",
                        "tags": ["Employees"],
                        "responses": {
                            "200": {
                                "description": "All employees with their departments",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Employee" }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create an employee",
                        "description": "A departmentId that matches no department is dropped silently.",
                        "tags": ["Employees"],
                        "requestBody": input_body.clone(),
                        "responses": { "201": text("Employee created") }
                    }
                },
                "/employees/{id}": {
                    "get": {
                        "summary": "Get an employee",
                        "tags": ["Employees"],
                        "parameters": id_param.clone(),
                        "responses": {
                            "200": {
                                "description": "The employee",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Employee" }
                                    }
                                }
                            },
                            "404": not_found.clone()
                        }
                    },
                    "put": {
                        "summary": "Replace an employee",
                        "description": "Answers 200 even when no employee has this id; nothing is written in that case.",
                        "tags": ["Employees"],
                        "parameters": id_param.clone(),
                        "requestBody": input_body,
                        "responses": { "200": text("Employee updated") }
                    },
                    "delete": {
                        "summary": "Delete an employee",
                        "tags": ["Employees"],
                        "parameters": id_param.clone(),
                        "responses": { "200": text("Employee deleted") }
                    }
                },
                "/employees/{id}/department": {
                    "get": {
                        "summary": "Get an employee's department",
                        "tags": ["Employees"],
                        "parameters": id_param,
                        "responses": {
                            "200": {
                                "description": "The department",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Department" }
                                    }
                                }
                            },
                            "404": not_found
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Employee": {
                        "type": "object",
                        "properties": {
                            "employeeID": { "type": "integer", "format": "int64" },
                            "firstName": { "type": "string" },
                            "lastName": { "type": "string" },
                            "department": {
                                "oneOf": [
                                    { "$ref": "#/components/schemas/Department" },
                                    { "type": "null" }
                                ]
                            }
                        },
                        "required": ["employeeID", "firstName", "lastName"]
                    },
                    "EmployeeInput": {
                        "type": "object",
                        "properties": {
                            "employeeID": { "type": "integer", "format": "int64" },
                            "firstName": { "type": "string" },
                            "lastName": { "type": "string" },
                            "departmentId": {
                                "type": "integer",
                                "format": "int64",
                                "description": "Department to attach, by id"
                            }
                        },
                        "required": ["firstName", "lastName"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: r#"
                CREATE TABLE IF NOT EXISTS employee (
                    employee_id   INTEGER PRIMARY KEY AUTOINCREMENT,
                    first_name    TEXT NOT NULL,
                    last_name     TEXT NOT NULL,
                    department_id INTEGER REFERENCES department (department_id)
                );
                CREATE INDEX IF NOT EXISTS employee_department_idx ON employee (department_id);
                "#,
        }]
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "employees module stopped");
        Ok(())
    }
}

/// Create a new instance of the employees module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(EmployeesModule::new())
}
