//! Settlement endpoints: direct payments between two members.

use api_types::settlement::{SettlementCreated, SettlementNew};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use ledger::{LedgerError, MoneyCents, Settlement};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

pub async fn create(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<SettlementNew>,
) -> Result<Json<SettlementCreated>, ServerError> {
    let mut store = state.store_mut()?;
    let group = store
        .group_mut(group_id)
        .ok_or_else(|| ServerError::NotFound("group not exists".to_string()))?;

    for member_id in [payload.from_member_id, payload.to_member_id] {
        if !group.has_member(member_id) {
            return Err(LedgerError::UnknownMember(member_id.to_string()).into());
        }
    }

    let settlement = Settlement::new(
        payload.from_member_id,
        payload.to_member_id,
        MoneyCents::new(payload.amount_minor),
        payload.note,
        payload.occurred_at.with_timezone(&Utc),
    )?;
    let id = settlement.id;
    group.settlements.push(settlement);
    Ok(Json(SettlementCreated { id }))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path((group_id, settlement_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ServerError> {
    let mut store = state.store_mut()?;
    let group = store
        .group_mut(group_id)
        .ok_or_else(|| ServerError::NotFound("group not exists".to_string()))?;

    if !group.remove_settlement(settlement_id) {
        return Err(ServerError::NotFound("settlement not exists".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
