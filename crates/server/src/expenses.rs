//! Expense endpoints.
//!
//! Creation runs the split calculator before anything is stored, so only
//! expenses whose shares reconcile exactly with the total ever enter the
//! event set.

use api_types::expense::{ExpenseCreated, ExpenseNew, ShareView, SplitInput};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use ledger::{Expense, LedgerError, MoneyCents, SplitPolicy, compute_split};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn split_parts(split: SplitInput) -> (Vec<Uuid>, SplitPolicy) {
    match split {
        SplitInput::Equal { participants } => (participants, SplitPolicy::Equal),
        SplitInput::Unequal { participants } => {
            let (ids, amounts) = participants
                .into_iter()
                .map(|entry| (entry.member_id, MoneyCents::new(entry.amount_minor)))
                .unzip();
            (ids, SplitPolicy::Unequal(amounts))
        }
        SplitInput::Percentage { participants } => {
            let (ids, percents) = participants
                .into_iter()
                .map(|entry| (entry.member_id, entry.percent_bp))
                .unzip();
            (ids, SplitPolicy::Percentage(percents))
        }
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<ExpenseNew>,
) -> Result<Json<ExpenseCreated>, ServerError> {
    let (participants, policy) = split_parts(payload.split);
    let total = MoneyCents::new(payload.amount_minor);

    let mut store = state.store_mut()?;
    let group = store
        .group_mut(group_id)
        .ok_or_else(|| ServerError::NotFound("group not exists".to_string()))?;

    for member_id in participants.iter().chain(std::iter::once(&payload.payer_id)) {
        if !group.has_member(*member_id) {
            return Err(LedgerError::UnknownMember(member_id.to_string()).into());
        }
    }

    let shares = compute_split(total, &policy, &participants)?;
    let expense = Expense::new(
        payload.payer_id,
        total,
        shares,
        payload.note,
        payload.occurred_at.with_timezone(&Utc),
    )?;

    let response = ExpenseCreated {
        id: expense.id,
        shares: expense
            .shares
            .iter()
            .map(|share| ShareView {
                member_id: share.member_id,
                amount_minor: share.amount.cents(),
                percent_bp: share.percent_bp,
            })
            .collect(),
    };
    group.expenses.push(expense);
    Ok(Json(response))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path((group_id, expense_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ServerError> {
    let mut store = state.store_mut()?;
    let group = store
        .group_mut(group_id)
        .ok_or_else(|| ServerError::NotFound("group not exists".to_string()))?;

    if !group.remove_expense(expense_id) {
        return Err(ServerError::NotFound("expense not exists".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
