//! Collection endpoints: contributions paid into the shared pool.

use api_types::collection::{CollectionCreated, CollectionNew};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use ledger::{Collection, LedgerError, MoneyCents};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

pub async fn create(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<CollectionNew>,
) -> Result<Json<CollectionCreated>, ServerError> {
    let mut store = state.store_mut()?;
    let group = store
        .group_mut(group_id)
        .ok_or_else(|| ServerError::NotFound("group not exists".to_string()))?;

    for member_id in [payload.contributor_id, payload.collector_id] {
        if !group.has_member(member_id) {
            return Err(LedgerError::UnknownMember(member_id.to_string()).into());
        }
    }

    let collection = Collection::new(
        payload.contributor_id,
        payload.collector_id,
        MoneyCents::new(payload.amount_minor),
        payload.occurred_at.with_timezone(&Utc),
    )?;
    let id = collection.id;
    group.collections.push(collection);
    Ok(Json(CollectionCreated { id }))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path((group_id, collection_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ServerError> {
    let mut store = state.store_mut()?;
    let group = store
        .group_mut(group_id)
        .ok_or_else(|| ServerError::NotFound("group not exists".to_string()))?;

    if !group.remove_collection(collection_id) {
        return Err(ServerError::NotFound("collection not exists".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
