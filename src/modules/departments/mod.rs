pub mod models;
pub mod routes;
pub mod service;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use once_cell::sync::OnceCell;
use roster_kernel::{InitCtx, Migration, Module};
use serde_json::json;

use service::DepartmentService;
use store::SqliteDepartmentStore;

/// Department records: CRUD over the `department` table.
pub struct DepartmentsModule {
    service: OnceCell<DepartmentService>,
}

impl DepartmentsModule {
    pub const fn new() -> Self {
        Self {
            service: OnceCell::new(),
        }
    }
}

impl Default for DepartmentsModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for DepartmentsModule {
    fn name(&self) -> &'static str {
        "departments"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let store = Arc::new(SqliteDepartmentStore::new(ctx.db.clone()));
        self.service
            .set(DepartmentService::new(store))
            .map_err(|_| anyhow::anyhow!("departments module initialized twice"))?;

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "departments module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        match self.service.get() {
            Some(service) => routes::router(service.clone()),
            None => {
                tracing::warn!(module = self.name(), "routes requested before init");
                Router::new()
            }
        }
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let not_found = json!({
            "description": "Department not found",
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
        let text = |description: &str| {
            json!({
                "description": description,
                "content": { "text/plain": { "schema": { "type": "string" } } }
            })
        };
        let department_body = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/Department" }
                }
            }
        });

        Some(json!({
            "paths": {
                "/departments/count": {
                    "get": {
                        "summary": "Count departments",
                        "tags": ["Departments"],
                        "responses": {
                            "200": {
                                "description": "Number of departments",
                                "content": {
                                    "application/json": {
                                        "schema": { "type": "integer", "format": "int64" }
                                    }
                                }
                            }
                        }
                    }
                },
                "/departments": {
                    "get": {
                        "summary": "List departments",
                        "tags": ["Departments"],
                        "responses": {
                            "200": {
                                "description": "All departments",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Department" }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create a department",
                        "tags": ["Departments"],
                        "requestBody": department_body.clone(),
                        "responses": { "201": text("department created") }
                    }
                },
                "/departments/{id}": {
                    "get": {
                        "summary": "Get a department",
                        "tags": ["Departments"],
                        "parameters": id_param.clone(),
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
                    },
                    "put": {
                        "summary": "Replace a department",
                        "description": "Answers 200 even when no department has this id; nothing is written in that case.",
                        "tags": ["Departments"],
                        "parameters": id_param.clone(),
                        "requestBody": department_body,
                        "responses": { "200": text("department updated") }
                    },
                    "delete": {
                        "summary": "Delete a department",
                        "tags": ["Departments"],
                        "parameters": id_param,
                        "responses": { "200": text("department deleted") }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Department": {
                        "type": "object",
                        "properties": {
                            "departmentId": {
                                "type": "integer",
                                "format": "int64",
                                "description": "Store-assigned identifier"
                            },
                            "shortName": {
                                "type": "string",
                                "description": "Short label"
                            },
                            "departmentName": {
                                "type": "string",
                                "description": "Display name"
                            }
                        },
                        "required": ["shortName", "departmentName"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: r#"
                CREATE TABLE IF NOT EXISTS department (
                    department_id   INTEGER PRIMARY KEY AUTOINCREMENT,
                    short_name      TEXT NOT NULL,
                    department_name TEXT NOT NULL
                );
                "#,
        }]
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "departments module stopped");
        Ok(())
    }
}

/// Create a new instance of the departments module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(DepartmentsModule::new())
}
