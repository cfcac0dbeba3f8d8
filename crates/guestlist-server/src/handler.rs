use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use guestlist_store::Guest;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::ApiError;
use crate::state::AppState;

/// JSON body for acknowledgements and errors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
    pub status_code: u16,
}

impl StatusMessage {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            status_code: status.as_u16(),
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::OK)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "ok".into() }
    }
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler.
pub async fn info_handler(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let guests = state.run(|store| store.len()).await??;
    Ok(Json(serde_json::json!({
        "name": "guestlist-server",
        "version": env!("CARGO_PKG_VERSION"),
        "guests": guests,
    })))
}

/// `GET /v1/guest`
pub async fn list_guests(State(state): State<AppState>) -> Result<Json<Vec<Guest>>, ApiError> {
    let guests = state.run(|store| store.get_all()).await??;
    Ok(Json(guests))
}

/// `GET /v1/guest/{id}`
pub async fn get_guest(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Guest>, ApiError> {
    let guest = state.run(move |store| store.get(&id)).await??;
    Ok(Json(guest))
}

/// `POST /v1/guest`
///
/// Any body that is not a JSON object of guest fields is a 400.
pub async fn create_guest(
    State(state): State<AppState>,
    payload: Result<Json<Guest>, JsonRejection>,
) -> Result<Json<StatusMessage>, ApiError> {
    let Json(guest) = payload.map_err(|rejection| {
        debug!(%rejection, "rejected guest body");
        ApiError::BadRequest
    })?;

    debug!(id = %guest.id(), "saving guest to database");
    state
        .run(move |store| store.save(guest))
        .await?
        .map_err(|e| {
            let err = ApiError::from(e);
            error!("{err}");
            err
        })?;

    Ok(Json(StatusMessage::ok("successfully saved guest")))
}

/// `DELETE /v1/guest/{id}`
///
/// Deleting an unknown id succeeds. Any store failure is a 500.
pub async fn delete_guest(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusMessage>, ApiError> {
    debug!(%id, "deleting guest");
    let target = id.clone();
    let removed = state
        .run(move |store| store.delete(&target))
        .await?
        .map_err(|e| {
            let err = ApiError::DeleteFailed(e);
            error!("{err}");
            err
        })?;
    debug!(%id, removed, "guest deleted");

    Ok(Json(StatusMessage::ok(format!(
        "successfully deleted guest with id {id}"
    ))))
}
