use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use service::{ListItemInput, ListRecord};

use crate::errors::JsonApiError;
use crate::routes::ServerState;

// Unparseable bodies get a message distinct from field validation so clients
// can tell a broken payload from a rejected one.
fn body_or_400(payload: Result<Json<ListItemInput>, JsonRejection>) -> Result<ListItemInput, JsonApiError> {
    match payload {
        Ok(Json(input)) => Ok(input),
        Err(_) => Err(JsonApiError::bad_request("Invalid JSON format in request body")),
    }
}

#[utoipa::path(
    post, path = "/lists", tag = "lists",
    request_body = crate::openapi::ListItemInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Missing or invalid list field"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ListItemInput>, JsonRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), JsonApiError> {
    let input = body_or_400(payload)?;
    let record = state.records.create(&input).await?;
    info!("list created");
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({"message": "List created successfully", "data": record})),
    ))
}

#[utoipa::path(
    get, path = "/lists", tag = "lists",
    responses(
        (status = 200, description = "All records"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<ListRecord>>, JsonApiError> {
    let records = state.records.list().await?;
    Ok(Json(records))
}

#[utoipa::path(
    get, path = "/lists/{id}", tag = "lists",
    params(("id" = String, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "Record"),
        (status = 400, description = "Malformed identifier"),
        (status = 404, description = "No matching record")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ListRecord>, JsonApiError> {
    let record = state.records.get(&id).await?;
    Ok(Json(record))
}

#[utoipa::path(
    put, path = "/lists/{id}", tag = "lists",
    params(("id" = String, Path, description = "Record identifier")),
    request_body = crate::openapi::ListItemInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Malformed identifier or invalid list field"),
        (status = 404, description = "No matching record")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<ListItemInput>, JsonRejection>,
) -> Result<Json<serde_json::Value>, JsonApiError> {
    let input = body_or_400(payload)?;
    let record = state.records.update(&id, &input).await?;
    info!(id = %id, "list updated");
    Ok(Json(serde_json::json!({"message": "List updated successfully", "data": record})))
}

#[utoipa::path(
    delete, path = "/lists/{id}", tag = "lists",
    params(("id" = String, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Malformed identifier"),
        (status = 404, description = "No matching record")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, JsonApiError> {
    state.records.delete(&id).await?;
    info!(id = %id, "list deleted");
    Ok(Json(serde_json::json!({"message": "List deleted successfully"})))
}
