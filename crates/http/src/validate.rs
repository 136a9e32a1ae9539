//! Validating extractor wrapper backed by `garde`.
//!
//! `Garde<E>` runs the inner extractor (`Json`, `Query`, `Path`, ...) and then
//! validates the extracted value before the handler body runs. Both failure
//! paths surface as [`AppError::Validation`], so clients always get a 422 with
//! field-level details.

use std::fmt::Display;
use std::ops::{Deref, DerefMut};

use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use garde::{Report, Validate};
use serde_json::{json, Value};

use crate::error::AppError;

const VALIDATION_MESSAGE: &str = "Request validation failed";

#[derive(Debug, Clone, Copy, Default)]
pub struct Garde<E>(pub E);

impl<E> Deref for Garde<E> {
    type Target = E;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<E> DerefMut for Garde<E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Flatten a garde report into `{field, error}` detail entries.
pub fn report_details(report: &Report) -> Vec<Value> {
    report
        .iter()
        .map(|(path, error)| json!({ "field": path.to_string(), "error": error.message() }))
        .collect()
}

impl From<Report> for AppError {
    fn from(report: Report) -> Self {
        AppError::validation(report_details(&report), VALIDATION_MESSAGE)
    }
}

fn rejected(rejection: impl Display) -> AppError {
    AppError::validation(
        vec![json!({ "field": "request", "error": rejection.to_string() })],
        VALIDATION_MESSAGE,
    )
}

impl<S, Extractor, T> FromRequest<S> for Garde<Extractor>
where
    S: Send + Sync,
    T: Validate<Context = ()>,
    Extractor: Deref<Target = T> + FromRequest<S>,
    Extractor::Rejection: Display,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let inner = Extractor::from_request(req, state)
            .await
            .map_err(rejected)?;

        inner.deref().validate()?;
        Ok(Garde(inner))
    }
}

impl<S, Extractor, T> FromRequestParts<S> for Garde<Extractor>
where
    S: Send + Sync,
    T: Validate<Context = ()>,
    Extractor: Deref<Target = T> + FromRequestParts<S>,
    Extractor::Rejection: Display,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let inner = Extractor::from_request_parts(parts, state)
            .await
            .map_err(rejected)?;

        inner.deref().validate()?;
        Ok(Garde(inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        extract::Query,
        http::{header, Request, StatusCode},
        routing::{get, post},
        Json, Router,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct Payload {
        #[garde(length(chars, min = 3, max = 10))]
        name: String,
        #[garde(range(min = 1, max = 5))]
        stars: i32,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct Filter {
        #[garde(range(min = 1999, max = 2014))]
        year: i32,
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/payload",
                post(|Garde(Json(p)): Garde<Json<Payload>>| async move { p.name }),
            )
            .route(
                "/filter",
                get(|Garde(Query(f)): Garde<Query<Filter>>| async move { f.year.to_string() }),
            )
    }

    async fn error_of(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        body["error"].clone()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn valid_body_reaches_handler() {
        let response = app()
            .oneshot(post_json("/payload", r#"{"name":"abc","stars":5}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn constraint_violations_are_listed_per_field() {
        let response = app()
            .oneshot(post_json("/payload", r#"{"name":"ab","stars":6}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let error = error_of(response).await;
        assert_eq!(error["code"], "validation_error");
        let fields: Vec<&str> = error["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["field"].as_str().unwrap())
            .collect();
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"stars"));
    }

    #[tokio::test]
    async fn malformed_body_is_a_validation_error() {
        let response = app()
            .oneshot(post_json("/payload", r#"{"name":"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error_of(response).await["details"][0]["field"], "request");
    }

    #[tokio::test]
    async fn query_parameters_are_validated() {
        let ok = app()
            .oneshot(
                Request::builder()
                    .uri("/filter?year=2014")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);

        for uri in ["/filter?year=2015", "/filter", "/filter?year=abc"] {
            let response = app()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        }
    }
}
