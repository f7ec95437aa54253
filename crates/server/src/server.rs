use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::{ServerError, balances, collections, expenses, groups, settlements, store::Store};

#[derive(Clone, Default)]
pub struct ServerState {
    store: Arc<RwLock<Store>>,
}

impl ServerState {
    pub fn store(&self) -> Result<RwLockReadGuard<'_, Store>, ServerError> {
        self.store
            .read()
            .map_err(|_| ServerError::Internal("state lock poisoned".to_string()))
    }

    pub fn store_mut(&self) -> Result<RwLockWriteGuard<'_, Store>, ServerError> {
        self.store
            .write()
            .map_err(|_| ServerError::Internal("state lock poisoned".to_string()))
    }
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/groups", post(groups::create))
        .route("/groups/{group_id}", get(groups::get))
        .route(
            "/groups/{group_id}/members",
            get(groups::list_members).post(groups::add_member),
        )
        .route("/groups/{group_id}/expenses", post(expenses::create))
        .route(
            "/groups/{group_id}/expenses/{expense_id}",
            delete(expenses::remove),
        )
        .route("/groups/{group_id}/collections", post(collections::create))
        .route(
            "/groups/{group_id}/collections/{collection_id}",
            delete(collections::remove),
        )
        .route("/groups/{group_id}/settlements", post(settlements::create))
        .route(
            "/groups/{group_id}/settlements/{settlement_id}",
            delete(settlements::remove),
        )
        .route("/groups/{group_id}/balances", get(balances::get))
        .route("/groups/{group_id}/suggestions", get(balances::suggestions))
        .with_state(state)
}

/// Builds the application with a fresh, empty in-memory store.
pub fn app() -> Router {
    router(ServerState::default())
}

pub async fn run_with_listener(listener: tokio::net::TcpListener) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app()).await
}
