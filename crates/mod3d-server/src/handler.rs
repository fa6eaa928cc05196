use axum::extract::{Path, State};
use axum::response::Json;
use mod3d_types::{ModelRecord, ModelUpdate, RecordDraft, RecordFilter, RecordId, RecordView};
use serde_json::{json, Value};

use crate::auth::Authenticated;
use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Health check handler.
pub async fn health_handler() -> &'static str {
    "ok"
}

fn parse_id(raw: &str) -> ServerResult<RecordId> {
    raw.parse()
        .map_err(|e: mod3d_types::TypeError| ServerError::BadRequest(e.to_string()))
}

pub async fn list_public(State(state): State<AppState>) -> ServerResult<Json<Vec<RecordView>>> {
    let views = state
        .orchestrator
        .retrieve_all(RecordFilter::PublicOnly)
        .await?;
    Ok(Json(views))
}

pub async fn list_all(State(state): State<AppState>) -> ServerResult<Json<Vec<RecordView>>> {
    let views = state.orchestrator.retrieve_all(RecordFilter::All).await?;
    Ok(Json(views))
}

pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<RecordView>> {
    let view = state.orchestrator.retrieve_one(parse_id(&id)?).await?;
    Ok(Json(view))
}

pub async fn create_record(
    State(state): State<AppState>,
    Authenticated(author): Authenticated,
    Json(draft): Json<RecordDraft>,
) -> ServerResult<Json<ModelRecord>> {
    let record = state.orchestrator.create_record(draft, author).await?;
    Ok(Json(record))
}

pub async fn update_record(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
    Path(id): Path<String>,
    Json(update): Json<ModelUpdate>,
) -> ServerResult<Json<ModelRecord>> {
    let record = state
        .orchestrator
        .edit_record(parse_id(&id)?, update, identity)
        .await?;
    Ok(Json(record))
}

pub async fn delete_record(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
    Path(id): Path<String>,
) -> ServerResult<Json<Value>> {
    state
        .orchestrator
        .delete_record(parse_id(&id)?, identity)
        .await?;
    Ok(Json(json!({ "success": true })))
}
