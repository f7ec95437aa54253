//! Group and membership endpoints.

use api_types::group::{GroupCreated, GroupNew, GroupView};
use api_types::member::{MemberNew, MemberView, MembersResponse};
use axum::{
    Json,
    extract::{Path, State},
};
use ledger::Member;
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<GroupNew>,
) -> Result<Json<GroupCreated>, ServerError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ServerError::Generic(
            "group name must not be empty".to_string(),
        ));
    }

    let id = state.store_mut()?.create_group(name.to_string());
    tracing::info!("created group {id}");
    Ok(Json(GroupCreated { id }))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<GroupView>, ServerError> {
    let store = state.store()?;
    let group = store
        .group(group_id)
        .ok_or_else(|| ServerError::NotFound("group not exists".to_string()))?;

    Ok(Json(GroupView {
        id: group.id,
        name: group.name.clone(),
        member_count: group.members.len(),
    }))
}

pub async fn add_member(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<MemberNew>,
) -> Result<Json<MemberView>, ServerError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ServerError::Generic(
            "member name must not be empty".to_string(),
        ));
    }

    let mut store = state.store_mut()?;
    let group = store
        .group_mut(group_id)
        .ok_or_else(|| ServerError::NotFound("group not exists".to_string()))?;

    let member = Member::new(name);
    let view = MemberView {
        id: member.id,
        name: member.name.clone(),
    };
    group.members.push(member);
    Ok(Json(view))
}

pub async fn list_members(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<MembersResponse>, ServerError> {
    let store = state.store()?;
    let group = store
        .group(group_id)
        .ok_or_else(|| ServerError::NotFound("group not exists".to_string()))?;

    let members = group
        .members
        .iter()
        .map(|member| MemberView {
            id: member.id,
            name: member.name.clone(),
        })
        .collect();
    Ok(Json(MembersResponse { members }))
}
