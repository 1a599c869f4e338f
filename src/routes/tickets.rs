//! HTTP surface of the ticket resource controller.
//!
//! Handlers are thin: the principal id comes from the identity middleware,
//! input validation happens at extraction, and everything else (identity
//! resolution, authorization, store access) lives in [`TicketService`].

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use axum_valid::Valid;
use serde::Serialize;
use uuid::Uuid;

use super::error::ApiError;
use crate::{
    AppState,
    middleware::PrincipalId,
    models::{CreateTicket, Ticket, UpdateTicket},
};

/// Deletion confirmation body.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Build the `/tickets` router.
///
/// `notes` is the external notes sub-resource; when supplied it is nested
/// under `/{id}/notes` with the ticket id path segment passed through
/// unchanged. ticketd itself ships no notes implementation.
pub fn router(notes: Option<Router<AppState>>) -> Router<AppState> {
    let mut router = Router::new()
        .route("/all", get(list_all))
        .route("/", get(list_own).post(create))
        .route("/{id}", get(get_one).put(update).delete(delete));

    if let Some(notes) = notes {
        router = router.nest("/{id}/notes", notes);
    }

    router
}

/// List every ticket in the system (admin only).
#[tracing::instrument(name = "tickets.list_all", skip(state, principal))]
pub async fn list_all(
    State(state): State<AppState>,
    Extension(principal): Extension<PrincipalId>,
) -> Result<Json<Vec<Ticket>>, ApiError> {
    let tickets = state.services.tickets.list_all(principal.0).await?;
    Ok(Json(tickets))
}

/// List the caller's tickets.
#[tracing::instrument(name = "tickets.list_own", skip(state, principal))]
pub async fn list_own(
    State(state): State<AppState>,
    Extension(principal): Extension<PrincipalId>,
) -> Result<Json<Vec<Ticket>>, ApiError> {
    let tickets = state.services.tickets.list_own(principal.0).await?;
    Ok(Json(tickets))
}

/// Get a single ticket by id.
#[tracing::instrument(name = "tickets.get", skip(state, principal), fields(%id))]
pub async fn get_one(
    State(state): State<AppState>,
    Extension(principal): Extension<PrincipalId>,
    Path(id): Path<Uuid>,
) -> Result<Json<Ticket>, ApiError> {
    let ticket = state.services.tickets.get(principal.0, id).await?;
    Ok(Json(ticket))
}

/// Create a ticket owned by the caller.
#[tracing::instrument(name = "tickets.create", skip(state, principal, input))]
pub async fn create(
    State(state): State<AppState>,
    Extension(principal): Extension<PrincipalId>,
    Valid(Json(input)): Valid<Json<CreateTicket>>,
) -> Result<(StatusCode, Json<Ticket>), ApiError> {
    let ticket = state.services.tickets.create(principal.0, input).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// Update a ticket's product, description, and/or status.
#[tracing::instrument(name = "tickets.update", skip(state, principal, input), fields(%id))]
pub async fn update(
    State(state): State<AppState>,
    Extension(principal): Extension<PrincipalId>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateTicket>,
) -> Result<Json<Ticket>, ApiError> {
    let ticket = state.services.tickets.update(principal.0, id, input).await?;
    Ok(Json(ticket))
}

/// Delete a ticket (owner only).
#[tracing::instrument(name = "tickets.delete", skip(state, principal), fields(%id))]
pub async fn delete(
    State(state): State<AppState>,
    Extension(principal): Extension<PrincipalId>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.services.tickets.delete(principal.0, id).await?;
    Ok(Json(DeleteResponse { success: true }))
}
