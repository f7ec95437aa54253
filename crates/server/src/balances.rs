//! Balance and suggestion endpoints.
//!
//! Both views are recomputed from the group's full event set on every
//! request; nothing derived is ever stored.

use api_types::balance::{
    BalanceStatus as ApiStatus, BalanceView, BalancesResponse, SuggestionView, SuggestionsResponse,
};
use axum::{
    Json,
    extract::{Path, State},
};
use ledger::{BalanceStatus, MemberBalances, compute_balances, suggest_settlements};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn map_status(status: BalanceStatus) -> ApiStatus {
    match status {
        BalanceStatus::Owed => ApiStatus::Owed,
        BalanceStatus::Owes => ApiStatus::Owes,
        BalanceStatus::Settled => ApiStatus::Settled,
    }
}

fn group_balances(state: &ServerState, group_id: Uuid) -> Result<MemberBalances, ServerError> {
    let store = state.store()?;
    let group = store
        .group(group_id)
        .ok_or_else(|| ServerError::NotFound("group not exists".to_string()))?;

    Ok(compute_balances(
        &group.members,
        &group.expenses,
        &group.collections,
        &group.settlements,
    )?)
}

pub async fn get(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<BalancesResponse>, ServerError> {
    let balances = group_balances(&state, group_id)?;

    let balances = balances
        .iter()
        .map(|(member_id, amount)| BalanceView {
            member_id: *member_id,
            amount_minor: amount.cents(),
            status: map_status(BalanceStatus::of(*amount)),
        })
        .collect();
    Ok(Json(BalancesResponse { balances }))
}

pub async fn suggestions(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<SuggestionsResponse>, ServerError> {
    let balances = group_balances(&state, group_id)?;
    let suggestions = suggest_settlements(&balances);

    let total_minor = suggestions.iter().map(|s| s.amount.cents()).sum();
    let suggestions = suggestions
        .into_iter()
        .map(|s| SuggestionView {
            from_member_id: s.from_member_id,
            to_member_id: s.to_member_id,
            amount_minor: s.amount.cents(),
        })
        .collect();
    Ok(Json(SuggestionsResponse {
        suggestions,
        total_minor,
    }))
}
