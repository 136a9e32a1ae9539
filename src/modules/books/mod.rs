pub mod models;
pub mod routes;
pub mod store;

use async_trait::async_trait;
use axum::Router;
use catalog_kernel::{settings::CatalogSettings, InitCtx, Module};
use serde_json::json;

use store::CatalogStore;

/// Books module: owns the catalog and exposes it over HTTP
pub struct BooksModule {
    store: CatalogStore,
}

impl BooksModule {
    pub fn new(store: CatalogStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let books = self.store.len().await;
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let books = self.store.len().await;
        tracing::info!(
            module = self.name(),
            books,
            "books module stopped; catalog discarded"
        );
        Ok(())
    }
}

fn error_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn json_response(description: &str, schema: serde_json::Value) -> serde_json::Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": schema } }
    })
}

fn book_list() -> serde_json::Value {
    json!({ "type": "array", "items": { "$ref": "#/components/schemas/Book" } })
}

fn book_id_param() -> serde_json::Value {
    json!({
        "name": "book_id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int64", "minimum": 1 }
    })
}

fn book_request_body() -> serde_json::Value {
    json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/BookRequest" }
            }
        }
    })
}

fn openapi_fragment() -> serde_json::Value {
    json!({
        "paths": {
            "/books": {
                "get": {
                    "summary": "List all books",
                    "tags": ["Books"],
                    "responses": { "200": json_response("All books in insertion order", book_list()) }
                }
            },
            "/books/{book_id}": {
                "get": {
                    "summary": "Get a book by id",
                    "tags": ["Books"],
                    "parameters": [book_id_param()],
                    "responses": {
                        "200": json_response("The book", json!({ "$ref": "#/components/schemas/Book" })),
                        "404": error_response("Book not found"),
                        "422": error_response("Invalid book id")
                    }
                },
                "delete": {
                    "summary": "Delete a book",
                    "tags": ["Books"],
                    "parameters": [book_id_param()],
                    "responses": {
                        "204": { "description": "Deleted" },
                        "404": error_response("Book not found"),
                        "422": error_response("Invalid book id")
                    }
                }
            },
            "/books/": {
                "get": {
                    "summary": "List books with an exact rating",
                    "tags": ["Books"],
                    "parameters": [{
                        "name": "book_rating",
                        "in": "query",
                        "required": true,
                        "schema": {
                            "type": "number",
                            "exclusiveMinimum": -1,
                            "exclusiveMaximum": 5.01
                        }
                    }],
                    "responses": {
                        "200": json_response("Matching books", book_list()),
                        "422": error_response("Invalid rating")
                    }
                }
            },
            "/books/publish/": {
                "get": {
                    "summary": "List books published in a year",
                    "tags": ["Books"],
                    "parameters": [{
                        "name": "published",
                        "in": "query",
                        "required": true,
                        "schema": { "type": "integer", "minimum": 1999, "maximum": 2014 }
                    }],
                    "responses": {
                        "200": json_response("Matching books", book_list()),
                        "422": error_response("Invalid year")
                    }
                }
            },
            "/create-book": {
                "post": {
                    "summary": "Create a book",
                    "tags": ["Books"],
                    "requestBody": book_request_body(),
                    "responses": {
                        "201": json_response("Created", json!({ "$ref": "#/components/schemas/CreatedBook" })),
                        "422": error_response("Validation error")
                    }
                }
            },
            "/books/update_book": {
                "put": {
                    "summary": "Replace a book",
                    "tags": ["Books"],
                    "requestBody": book_request_body(),
                    "responses": {
                        "204": { "description": "Updated" },
                        "404": error_response("Book not found"),
                        "422": error_response("Validation error")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer", "format": "int64" },
                        "title": { "type": "string" },
                        "author": { "type": "string" },
                        "description": { "type": "string" },
                        "rating": { "type": "number", "format": "double" },
                        "publish": { "type": "integer", "format": "int32" }
                    },
                    "required": ["id", "title", "author", "description", "rating", "publish"]
                },
                "BookRequest": {
                    "type": "object",
                    "properties": {
                        "id": {
                            "type": "integer",
                            "format": "int64",
                            "description": "Ignored on create; selects the record on update"
                        },
                        "title": { "type": "string", "minLength": 3, "maxLength": 100 },
                        "author": { "type": "string", "minLength": 3, "maxLength": 50 },
                        "description": { "type": "string", "minLength": 3, "maxLength": 500 },
                        "rating": { "type": "number", "minimum": 0, "maximum": 5 },
                        "publish": { "type": "integer", "minimum": 1999, "maximum": 2024 }
                    },
                    "required": ["title", "author", "description", "rating", "publish"]
                },
                "CreatedBook": {
                    "type": "object",
                    "properties": {
                        "message": { "type": "string" },
                        "book": { "$ref": "#/components/schemas/Book" }
                    },
                    "required": ["message", "book"]
                }
            }
        }
    })
}

/// Create the books module, seeded according to `settings`
pub fn create_module(settings: &CatalogSettings) -> std::sync::Arc<BooksModule> {
    let store = if settings.seed {
        CatalogStore::seeded()
    } else {
        CatalogStore::default()
    };
    std::sync::Arc::new(BooksModule::new(store))
}
