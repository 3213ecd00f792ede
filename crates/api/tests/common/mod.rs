#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use deliverus_api::config::AppConfig;
use deliverus_api::router::build_router;
use deliverus_api::state::AppState;
use deliverus_core::product::lookup::{LookupError, RestaurantLookup};
use deliverus_core::types::DbId;
use http_body_util::BodyExt;
use tower::ServiceExt;

const BOUNDARY: &str = "deliverus-test-boundary";

/// In-memory restaurant store.
pub struct FakeRestaurants {
    pub ids: Vec<DbId>,
    pub offline: bool,
}

#[async_trait]
impl RestaurantLookup for FakeRestaurants {
    async fn restaurant_exists(&self, id: DbId) -> Result<bool, LookupError> {
        if self.offline {
            return Err(LookupError::new("connection refused"));
        }
        Ok(self.ids.contains(&id))
    }
}

/// Build the full application router with an in-memory store holding `ids`.
pub fn build_test_app(ids: &[DbId]) -> Router {
    build_app(
        AppConfig::default(),
        FakeRestaurants {
            ids: ids.to_vec(),
            offline: false,
        },
    )
}

pub fn build_app(config: AppConfig, restaurants: FakeRestaurants) -> Router {
    build_router(AppState::new(config, Arc::new(restaurants)))
}

/// A file part for a multipart form.
pub struct FilePart<'a> {
    pub field: &'a str,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub size: usize,
}

/// Encode text fields and files as a `multipart/form-data` body.
pub fn multipart_body(fields: &[(&str, &str)], files: &[FilePart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for file in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                file.field, file.file_name, file.content_type
            )
            .as_bytes(),
        );
        body.extend(std::iter::repeat(b'x').take(file.size));
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Send a multipart request.
pub async fn send_form(
    app: Router,
    method: Method,
    uri: &str,
    fields: &[(&str, &str)],
    files: &[FilePart<'_>],
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(fields, files)))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a raw body with an explicit `Content-Type`.
pub async fn send_body(
    app: Router,
    method: Method,
    uri: &str,
    content_type: &str,
    body: impl Into<Body>,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", content_type)
        .body(body.into())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a JSON request.
pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    json: &serde_json::Value,
) -> Response<Body> {
    send_body(app, method, uri, "application/json", json.to_string()).await
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A complete, valid product creation form for restaurant 1.
pub fn valid_create_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", " Paella "),
        ("description", "Rice with seafood"),
        ("price", "12.5"),
        ("order", "1"),
        ("availability", "true"),
        ("productCategoryId", "2"),
        ("restaurantId", "1"),
        ("fats", "10"),
        ("proteins", "20"),
        ("carbs", "70"),
    ]
}

/// The creation form without `restaurantId`.
pub fn valid_update_fields() -> Vec<(&'static str, &'static str)> {
    valid_create_fields()
        .into_iter()
        .filter(|(name, _)| *name != "restaurantId")
        .collect()
}

/// Replace (or add) one field in a form.
pub fn with_field(
    mut fields: Vec<(&'static str, &'static str)>,
    name: &'static str,
    value: &'static str,
) -> Vec<(&'static str, &'static str)> {
    fields.retain(|(n, _)| *n != name);
    fields.push((name, value));
    fields
}
