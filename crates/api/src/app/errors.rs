use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use serde_json::json;

use commandes_core::DomainError;
use commandes_domain::FieldError;
use commandes_infra::ServiceError;

/// Entity name carried in error payloads and alert messages.
pub const ENTITY_NAME: &str = "commandesCommande";

const ERROR_HEADER: &str = "x-commandesapp-error";
const PARAMS_HEADER: &str = "x-commandesapp-params";

/// 400 with the structured bad-request payload (entity name + error key)
/// and the matching error headers.
pub fn bad_request_alert(
    error_key: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    let mut headers = HeaderMap::new();
    insert_str(&mut headers, ERROR_HEADER, &format!("error.{error_key}"));
    insert_str(&mut headers, PARAMS_HEADER, ENTITY_NAME);

    (
        StatusCode::BAD_REQUEST,
        headers,
        axum::Json(json!({
            "error": error_key,
            "message": message.into(),
            "entityName": ENTITY_NAME,
        })),
    )
        .into_response()
}

/// 400 for payloads missing required fields, with per-field detail.
pub fn validation_error(field_errors: Vec<FieldError>) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        axum::Json(json!({
            "error": "validation",
            "message": "method argument not valid",
            "entityName": ENTITY_NAME,
            "fieldErrors": field_errors,
        })),
    )
        .into_response()
}

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(DomainError::Validation(msg)) => {
            json_error(StatusCode::BAD_REQUEST, "validation", msg)
        }
        ServiceError::Domain(DomainError::InvalidId(msg)) => {
            json_error(StatusCode::BAD_REQUEST, "idinvalid", msg)
        }
        ServiceError::Domain(DomainError::NotFound) => {
            json_error(StatusCode::NOT_FOUND, "notfound", "not found")
        }
        // Store failures, constraint violations included, surface as server errors.
        ServiceError::Repository(e) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal", e.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
            "entityName": ENTITY_NAME,
        })),
    )
        .into_response()
}

fn insert_str(headers: &mut HeaderMap, name: &'static str, value: &str) {
    if let Ok(value) = HeaderValue::from_str(value) {
        headers.insert(HeaderName::from_static(name), value);
    }
}
