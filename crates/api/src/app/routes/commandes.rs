use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use commandes_domain::CommandeDto;

use crate::app::dto::ListParams;
use crate::app::errors;
use crate::app::routes::common;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_commande).get(get_all_commandes))
        .route(
            "/:id",
            get(get_commande)
                .put(update_commande)
                .patch(partial_update_commande)
                .delete(delete_commande),
        )
}

/// `POST /api/commandes` : create a new commande.
///
/// 201 with the created body, or 400 when the payload already carries an id.
pub async fn create_commande(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<CommandeDto>,
) -> axum::response::Response {
    tracing::debug!(?body, "REST request to save commande");
    if body.id.is_some() {
        return errors::bad_request_alert("idexists", "A new commande cannot already have an ID");
    }

    let field_errors = body.validate_required();
    if !field_errors.is_empty() {
        return errors::validation_error(field_errors);
    }

    let created = match services.commandes_save(body).await {
        Ok(dto) => dto,
        Err(e) => return errors::service_error_to_response(e),
    };

    // The store assigns the id on insert.
    let id = created.id.unwrap_or_default();
    let mut headers = common::creation_alert(id);
    if let Ok(location) = HeaderValue::from_str(&format!("/api/commandes/{id}")) {
        headers.insert(header::LOCATION, location);
    }

    (StatusCode::CREATED, headers, Json(created)).into_response()
}

/// `PUT /api/commandes/{id}` : full replace of an existing commande.
///
/// 400 when the body id is null, mismatched with the path, or absent from
/// the store.
pub async fn update_commande(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
    Json(body): Json<CommandeDto>,
) -> axum::response::Response {
    tracing::debug!(id, ?body, "REST request to update commande");
    let Some(body_id) = body.id else {
        return errors::bad_request_alert("idnull", "Invalid id");
    };
    if body_id != id {
        return errors::bad_request_alert("idinvalid", "Invalid ID");
    }

    let field_errors = body.validate_required();
    if !field_errors.is_empty() {
        return errors::validation_error(field_errors);
    }

    match services.commandes_exists(id).await {
        Ok(true) => {}
        Ok(false) => return errors::bad_request_alert("idnotfound", "Entity not found"),
        Err(e) => return errors::service_error_to_response(e.into()),
    }

    match services.commandes_update(body).await {
        Ok(updated) => (StatusCode::OK, common::update_alert(id), Json(updated)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// `PATCH /api/commandes/{id}` : merge-patch of an existing commande; null
/// body fields leave the stored values untouched.
///
/// Accepts `application/json` and `application/merge-patch+json`.
pub async fn partial_update_commande(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
    Json(body): Json<CommandeDto>,
) -> axum::response::Response {
    tracing::debug!(id, ?body, "REST request to partial update commande");
    let Some(body_id) = body.id else {
        return errors::bad_request_alert("idnull", "Invalid id");
    };
    if body_id != id {
        return errors::bad_request_alert("idinvalid", "Invalid ID");
    }

    match services.commandes_exists(id).await {
        Ok(true) => {}
        Ok(false) => return errors::bad_request_alert("idnotfound", "Entity not found"),
        Err(e) => return errors::service_error_to_response(e.into()),
    }

    match services.commandes_partial_update(body).await {
        Ok(Some(merged)) => {
            (StatusCode::OK, common::update_alert(id), Json(merged)).into_response()
        }
        // Existed at the precondition check but vanished before the merge.
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// `GET /api/commandes` : list, with optional sort/pagination parameters.
pub async fn get_all_commandes(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<ListParams>,
) -> axum::response::Response {
    tracing::debug!("REST request to get all commandes");
    match services.commandes_find_all().await {
        Ok(items) => (StatusCode::OK, Json(params.apply(items))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// `GET /api/commandes/{id}` : fetch one, 404 when absent.
pub async fn get_commande(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    tracing::debug!(id, "REST request to get commande");
    match services.commandes_find_one(id).await {
        Ok(Some(dto)) => (StatusCode::OK, Json(dto)).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// `DELETE /api/commandes/{id}` : delete by id; deleting an absent id still
/// returns 204.
pub async fn delete_commande(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    tracing::debug!(id, "REST request to delete commande");
    match services.commandes_delete(id).await {
        Ok(()) => (StatusCode::NO_CONTENT, common::deletion_alert(id)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
