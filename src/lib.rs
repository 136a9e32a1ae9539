//! Book catalog application library
//!
//! Wires the feature modules into the kernel registry and drives the
//! service lifecycle around the HTTP server.

use anyhow::Context;
use catalog_kernel::{settings::Settings, InitCtx, ModuleRegistry};

pub mod modules;

pub use modules::books::models::{Book, BookRequest};
pub use modules::books::store::{CatalogError, CatalogStore};

/// Registry with every feature module registered
pub fn build_registry(settings: &Settings) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings);
    registry
}

/// Initialize modules, serve HTTP until shutdown, then stop modules
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let registry = build_registry(&settings);
    let ctx = InitCtx {
        settings: &settings,
    };

    registry
        .init_modules(&ctx)
        .await
        .context("module initialization failed")?;
    registry
        .start_modules(&ctx)
        .await
        .context("module startup failed")?;

    let served = catalog_http::start_server(&registry, &settings).await;

    registry
        .stop_modules()
        .await
        .context("module shutdown failed")?;

    served
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn full_router_serves_catalog_routes() {
        let settings = Settings::default();
        let registry = build_registry(&settings);
        assert!(registry.get_module("books").is_some());

        let response = catalog_http::build_router(&registry, &settings)
            .oneshot(Request::builder().uri("/books/7").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn merged_openapi_includes_book_paths() {
        let settings = Settings::default();
        let registry = build_registry(&settings);

        let spec = catalog_http::router::collect_openapi(&registry);
        assert!(spec["paths"]["/create-book"]["post"].is_object());
        assert!(spec["components"]["schemas"]["BookRequest"].is_object());
    }
}
