use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use common::types::Envelope;
use service::contacts::{Contact, ContactInput, MSG_CREATED, MSG_DELETED, MSG_UPDATED};
use service::errors::ServiceError;

use crate::{errors::ApiError, metrics, routes::AppState};

#[utoipa::path(
    get, path = "/contacts", tag = "contacts",
    responses(
        (status = 200, description = "All contacts", body = crate::openapi::ContactListEnvelopeDoc),
        (status = 500, description = "Store failure", body = crate::openapi::FailedEnvelopeDoc)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Envelope<Vec<Contact>>>, ApiError> {
    let started = Instant::now();
    let res = state.contacts.list().await;
    metrics::observe("list", started, &res);
    Ok(Json(Envelope::success(res?)))
}

#[utoipa::path(
    get, path = "/contacts/{contactId}", tag = "contacts",
    params(("contactId" = String, Path, description = "Contact id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ContactEnvelopeDoc),
        (status = 400, description = "Malformed id", body = crate::openapi::FailedEnvelopeDoc),
        (status = 404, description = "NO contact found", body = crate::openapi::FailedEnvelopeDoc),
        (status = 500, description = "Store failure", body = crate::openapi::FailedEnvelopeDoc)
    )
)]
pub async fn get(
    State(state): State<AppState>,
    Path(contact_id): Path<String>,
) -> Result<Json<Envelope<Contact>>, ApiError> {
    let started = Instant::now();
    let res = state.contacts.get(&contact_id).await;
    metrics::observe("get", started, &res);
    Ok(Json(Envelope::success(res?).with_msg("")))
}

#[utoipa::path(
    post, path = "/contacts", tag = "contacts",
    request_body = crate::openapi::ContactInputDoc,
    responses(
        (status = 200, description = "Contact is Created", body = crate::openapi::ContactEnvelopeDoc),
        (status = 400, description = "Validation errors, malformed body or duplicate mobile"),
        (status = 500, description = "Store failure", body = crate::openapi::FailedEnvelopeDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ContactInput>, JsonRejection>,
) -> Result<Json<Envelope<Contact>>, ApiError> {
    let Json(input) = payload?;
    let started = Instant::now();
    let res = state.contacts.create(input).await;
    metrics::observe("create", started, &res);
    Ok(Json(Envelope::success(res?).with_msg(MSG_CREATED)))
}

#[utoipa::path(
    put, path = "/contacts/{contactId}", tag = "contacts",
    params(("contactId" = String, Path, description = "Contact id")),
    request_body = crate::openapi::ContactInputDoc,
    responses(
        (status = 200, description = "Contact is Updated", body = crate::openapi::ContactEnvelopeDoc),
        (status = 400, description = "Validation errors, malformed id, duplicate mobile or contact not found"),
        (status = 500, description = "Store failure", body = crate::openapi::FailedEnvelopeDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(contact_id): Path<String>,
    payload: Result<Json<ContactInput>, JsonRejection>,
) -> Result<Json<Envelope<Contact>>, ApiError> {
    let Json(input) = payload?;
    let started = Instant::now();
    let res = state.contacts.update(&contact_id, input).await;
    metrics::observe("update", started, &res);
    // update reports a missing record as a bad request, unlike get/delete
    let updated = res.map_err(|e| match e {
        ServiceError::NotFound(_) => ApiError::new(StatusCode::BAD_REQUEST, e.to_string()),
        other => ApiError::from(other),
    })?;
    Ok(Json(Envelope::success(updated).with_msg(MSG_UPDATED)))
}

#[utoipa::path(
    delete, path = "/contacts/{contactId}", tag = "contacts",
    params(("contactId" = String, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Contact is Deleted; data is the removed record", body = crate::openapi::ContactEnvelopeDoc),
        (status = 400, description = "Malformed id", body = crate::openapi::FailedEnvelopeDoc),
        (status = 404, description = "No contact found", body = crate::openapi::FailedEnvelopeDoc),
        (status = 500, description = "Store failure", body = crate::openapi::FailedEnvelopeDoc)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(contact_id): Path<String>,
) -> Result<Json<Envelope<Contact>>, ApiError> {
    let started = Instant::now();
    let res = state.contacts.delete(&contact_id).await;
    metrics::observe("delete", started, &res);
    Ok(Json(Envelope::success(res?).with_msg(MSG_DELETED)))
}
