//! Shared handler helpers: entity alert headers on mutating responses.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

use crate::app::errors::ENTITY_NAME;

const ALERT_HEADER: &str = "x-commandesapp-alert";
const PARAMS_HEADER: &str = "x-commandesapp-params";

/// Alert headers for a successful create.
pub fn creation_alert(id: i64) -> HeaderMap {
    alert(
        format!("A new {ENTITY_NAME} is created with identifier {id}"),
        id,
    )
}

/// Alert headers for a successful full or partial update.
pub fn update_alert(id: i64) -> HeaderMap {
    alert(format!("A {ENTITY_NAME} is updated with identifier {id}"), id)
}

/// Alert headers for a successful delete.
pub fn deletion_alert(id: i64) -> HeaderMap {
    alert(format!("A {ENTITY_NAME} is deleted with identifier {id}"), id)
}

fn alert(message: String, id: i64) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&message) {
        headers.insert(HeaderName::from_static(ALERT_HEADER), value);
    }
    if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
        headers.insert(HeaderName::from_static(PARAMS_HEADER), value);
    }
    headers
}
