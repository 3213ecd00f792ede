//! Request body extraction for product forms.
//!
//! Accepts `multipart/form-data` (text parts become the request body, file
//! parts are measured and reduced to [`UploadedFile`] metadata) and
//! `application/json` objects, which carry no files. File contents are not
//! retained.

use axum::extract::multipart::Field;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use deliverus_core::product::upload::{UploadedFile, UploadedFiles};
use deliverus_core::types::RequestBody;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// MIME type assumed when a file part carries no `Content-Type`.
const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// A decoded product form.
///
/// Use as the last extractor of a handler:
///
/// ```ignore
/// async fn my_handler(State(state): State<AppState>, form: ProductForm) -> AppResult<Json<()>> {
///     tracing::debug!(fields = form.body.len(), "received product form");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Default)]
pub struct ProductForm {
    pub body: RequestBody,
    pub files: UploadedFiles,
}

impl FromRequest<AppState> for ProductForm {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let mime = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_ascii_lowercase())
            .unwrap_or_default();

        match mime.as_str() {
            "multipart/form-data" => {
                let mut multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                read_product_form(&mut multipart).await
            }
            "application/json" => {
                let Json(body) = Json::<RequestBody>::from_request(req, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                Ok(ProductForm {
                    body,
                    files: UploadedFiles::new(),
                })
            }
            "" => Err(AppError::BadRequest("Missing Content-Type header".into())),
            other => Err(AppError::BadRequest(format!(
                "Unsupported Content-Type {other:?}. Expected multipart/form-data or application/json"
            ))),
        }
    }
}

/// Read every part of a multipart request.
///
/// A part with a non-empty filename is treated as a file. A file part with
/// an empty filename is an unselected file input and is skipped. Every
/// other part is text. Parts without a name are ignored. Later parts
/// replace earlier ones with the same name.
pub async fn read_product_form(multipart: &mut Multipart) -> AppResult<ProductForm> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match field.file_name().map(str::to_string) {
            Some(file_name) if file_name.is_empty() => {
                measure(field).await?;
            }
            Some(file_name) => {
                let mime_type = field
                    .content_type()
                    .unwrap_or(FALLBACK_MIME_TYPE)
                    .to_string();
                let size_bytes = measure(field).await?;
                tracing::debug!(field = %name, %mime_type, size_bytes, "Received upload");
                form.files.insert(UploadedFile {
                    field: name,
                    file_name: Some(file_name),
                    mime_type,
                    size_bytes,
                });
            }
            None => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.body.insert(name, Value::String(text));
            }
        }
    }

    Ok(form)
}

/// Count the bytes of a file part without buffering it.
async fn measure(mut field: Field<'_>) -> AppResult<u64> {
    let mut size: u64 = 0;
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        size += chunk.len() as u64;
    }
    Ok(size)
}
