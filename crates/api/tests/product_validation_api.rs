//! HTTP-level integration tests for the `/products` validation endpoints.
//!
//! Uses Axum's `tower::ServiceExt` to send multipart requests directly to
//! the router, with an in-memory restaurant store.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    body_json, build_app, build_test_app, send_body, send_form, send_json, valid_create_fields,
    valid_update_fields, with_field, FakeRestaurants, FilePart,
};
use deliverus_api::config::AppConfig;
use deliverus_core::product::rules::ProductRuleConfig;
use serde_json::{json, Value};

const CREATE_URI: &str = "/api/v1/products/validate";
const UPDATE_URI: &str = "/api/v1/products/5/validate";

fn png(size: usize) -> FilePart<'static> {
    FilePart {
        field: "image",
        file_name: "dish.png",
        content_type: "image/png",
        size,
    }
}

fn errors_for<'a>(json: &'a Value, field: &str) -> Vec<&'a Value> {
    json["errors"]
        .as_array()
        .expect("errors should be an array")
        .iter()
        .filter(|e| e["field"] == field)
        .collect()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_valid_form_returns_coerced_product() {
    let app = build_test_app(&[1]);
    let response = send_form(app, Method::POST, CREATE_URI, &valid_create_fields(), &[]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["name"], "Paella");
    assert_eq!(data["price"], 12.5);
    assert_eq!(data["order"], 1);
    assert_eq!(data["availability"], true);
    assert_eq!(data["productCategoryId"], 2);
    assert_eq!(data["restaurantId"], 1);
    assert_eq!(data["fats"], 10.0);
    assert!(data["image"].is_null());
}

#[tokio::test]
async fn test_create_with_image_reports_metadata() {
    let app = build_test_app(&[1]);
    let response = send_form(
        app,
        Method::POST,
        CREATE_URI,
        &valid_create_fields(),
        &[png(2_000_000)],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["image"]["mimeType"], "image/png");
    assert_eq!(json["data"]["image"]["sizeBytes"], 2_000_000);
    assert_eq!(json["data"]["image"]["fileName"], "dish.png");
}

#[tokio::test]
async fn test_create_with_unselected_file_input_has_no_image() {
    let app = build_test_app(&[1]);
    let unselected = FilePart {
        field: "image",
        file_name: "",
        content_type: "application/octet-stream",
        size: 0,
    };
    let response = send_form(
        app,
        Method::POST,
        CREATE_URI,
        &valid_create_fields(),
        &[unselected],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["data"]["image"].is_null());
}

#[tokio::test]
async fn test_create_unknown_restaurant_is_422() {
    let app = build_test_app(&[2, 3]);
    let response = send_form(app, Method::POST, CREATE_URI, &valid_create_fields(), &[]).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let errors = errors_for(&json, "restaurantId");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["kind"], "reference_not_found");
    assert_eq!(errors[0]["message"], "The restaurantId does not exist.");
}

#[tokio::test]
async fn test_create_store_outage_is_lookup_failure() {
    let app = build_app(
        AppConfig::default(),
        FakeRestaurants {
            ids: vec![1],
            offline: true,
        },
    );
    let response = send_form(app, Method::POST, CREATE_URI, &valid_create_fields(), &[]).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    let errors = errors_for(&json, "restaurantId");
    assert_eq!(errors[0]["kind"], "lookup_failure");
    assert_eq!(errors[0]["message"], "Error: connection refused");
}

#[tokio::test]
async fn test_create_gif_image_is_rejected() {
    let app = build_test_app(&[1]);
    let gif = FilePart {
        field: "image",
        file_name: "dish.gif",
        content_type: "image/gif",
        size: 10,
    };
    let response = send_form(app, Method::POST, CREATE_URI, &valid_create_fields(), &[gif]).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    let errors = errors_for(&json, "image");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["kind"], "file_format");
    assert_eq!(
        errors[0]["message"],
        "Please upload an image with format (jpeg, png)."
    );
}

#[tokio::test]
async fn test_create_oversized_image_is_rejected() {
    let app = build_test_app(&[1]);
    let response = send_form(
        app,
        Method::POST,
        CREATE_URI,
        &valid_create_fields(),
        &[png(2_000_001)],
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    let errors = errors_for(&json, "image");
    assert_eq!(errors[0]["kind"], "file_size");
    assert_eq!(errors[0]["message"], "Maximum file size of 2MB");
}

#[tokio::test]
async fn test_create_nutrition_over_100_grams() {
    let app = build_test_app(&[1]);
    let fields = with_field(valid_create_fields(), "fats", "50");
    let fields = with_field(fields, "proteins", "50");
    let fields = with_field(fields, "carbs", "50");
    let response = send_form(app, Method::POST, CREATE_URI, &fields, &[]).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    let errors = errors_for(&json, "fats");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["kind"], "composition");
    assert_eq!(errors[0]["value"], "50");
}

#[tokio::test]
async fn test_create_collects_every_violation() {
    let app = build_test_app(&[1]);
    let fields = [
        ("price", "free"),
        ("availability", "maybe"),
        ("productCategoryId", "0"),
        ("fats", "120"),
        ("proteins", "0"),
        ("carbs", "0"),
    ];
    let response = send_form(app, Method::POST, CREATE_URI, &fields, &[]).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    let summary: Vec<(String, String)> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| {
            (
                e["field"].as_str().unwrap().to_string(),
                e["kind"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    let expected = [
        ("name", "field_presence"),
        ("price", "field_type"),
        ("availability", "field_type"),
        ("productCategoryId", "field_range"),
        ("restaurantId", "field_presence"),
        ("fats", "composition"),
        ("fats", "calorie_cap"),
    ];
    assert_eq!(
        summary,
        expected
            .iter()
            .map(|(f, k)| (f.to_string(), k.to_string()))
            .collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn test_configured_image_limit_applies() {
    let config = AppConfig {
        rules: ProductRuleConfig::with_max_image_bytes(1_000).unwrap(),
        ..AppConfig::default()
    };
    let app = build_app(
        config,
        FakeRestaurants {
            ids: vec![1],
            offline: false,
        },
    );
    let response =
        send_form(app, Method::POST, CREATE_URI, &valid_create_fields(), &[png(1_001)]).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(
        errors_for(&json, "image")[0]["message"],
        "Maximum file size of 0.001MB"
    );
}

// ---------------------------------------------------------------------------
// JSON bodies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_json_body_accepts_native_values() {
    let app = build_test_app(&[1]);
    let body = json!({
        "name": "Paella",
        "price": 12.5,
        "order": 1,
        "availability": false,
        "productCategoryId": 2,
        "restaurantId": 1,
        "fats": 10,
        "proteins": 20,
        "carbs": 70,
    });
    let response = send_json(app, Method::POST, CREATE_URI, &body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["price"], 12.5);
    assert_eq!(json["data"]["availability"], false);
    assert_eq!(json["data"]["restaurantId"], 1);
    assert!(json["data"]["image"].is_null());
}

#[tokio::test]
async fn test_json_body_violations_are_422() {
    let app = build_test_app(&[1]);
    let body = json!({
        "name": 42,
        "price": 12.5,
        "productCategoryId": 2,
        "restaurantId": 1,
        "fats": 10,
        "proteins": 20,
        "carbs": 70,
    });
    let response = send_json(app, Method::POST, CREATE_URI, &body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    let errors = errors_for(&json, "name");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["kind"], "field_type");
}

#[tokio::test]
async fn test_json_body_must_be_an_object() {
    let app = build_test_app(&[1]);
    let response = send_json(app, Method::POST, CREATE_URI, &json!(["Paella"])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_unsupported_content_type_is_400() {
    let app = build_test_app(&[1]);
    let response = send_body(app, Method::POST, CREATE_URI, "text/plain", "name=Paella").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_update_valid_form_has_no_restaurant() {
    let app = build_test_app(&[]);
    let response = send_form(app, Method::PUT, UPDATE_URI, &valid_update_fields(), &[]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], " Paella ");
    assert!(json["data"]["restaurantId"].is_null());
}

#[tokio::test]
async fn test_update_with_restaurant_id_is_rejected() {
    let app = build_test_app(&[1]);
    let fields = with_field(valid_update_fields(), "restaurantId", "1");
    let response = send_form(app, Method::PUT, UPDATE_URI, &fields, &[]).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "restaurantId");
    assert_eq!(errors[0]["kind"], "field_presence");
}

#[tokio::test]
async fn test_update_rejects_non_positive_id() {
    let app = build_test_app(&[]);
    let response = send_form(
        app,
        Method::PUT,
        "/api/v1/products/0/validate",
        &valid_update_fields(),
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_multipart_is_400() {
    let app = build_test_app(&[1]);
    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri(CREATE_URI)
        .header("content-type", "multipart/form-data; boundary=abc")
        .body(axum::body::Body::from("--abc\r\nnot a valid part"))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_multipart_without_boundary_is_400() {
    let app = build_test_app(&[1]);
    let response = send_body(app, Method::POST, CREATE_URI, "multipart/form-data", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}
