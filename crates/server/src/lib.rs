use axum::{Json, http::StatusCode, response::IntoResponse};
use ledger::LedgerError;
use serde::Serialize;

pub use server::{app, run_with_listener};

mod balances;
mod collections;
mod expenses;
mod groups;
mod server;
mod settlements;
mod store;

pub mod types {
    pub mod group {
        pub use api_types::group::{GroupCreated, GroupNew, GroupView};
    }

    pub mod member {
        pub use api_types::member::{MemberNew, MemberView, MembersResponse};
    }

    pub mod expense {
        pub use api_types::expense::{
            AmountEntry, ExpenseCreated, ExpenseNew, PercentEntry, ShareView, SplitInput,
        };
    }

    pub mod collection {
        pub use api_types::collection::{CollectionCreated, CollectionNew};
    }

    pub mod settlement {
        pub use api_types::settlement::{SettlementCreated, SettlementNew};
    }

    pub mod balance {
        pub use api_types::balance::{
            BalanceStatus, BalanceView, BalancesResponse, SuggestionView, SuggestionsResponse,
        };
    }
}

pub enum ServerError {
    Ledger(LedgerError),
    NotFound(String),
    Generic(String),
    Internal(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_ledger_error(err: &LedgerError) -> StatusCode {
    // Every core error is a deterministic validation failure; the caller must
    // correct the input, so they all map to 422.
    match err {
        LedgerError::SplitMismatch(_)
        | LedgerError::PercentageMismatch(_)
        | LedgerError::NoParticipants(_)
        | LedgerError::UnknownMember(_)
        | LedgerError::NegativeAmount(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Ledger(err) => (status_for_ledger_error(&err), err.to_string()),
            ServerError::NotFound(err) => (StatusCode::NOT_FOUND, err),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
            ServerError::Internal(err) => (StatusCode::INTERNAL_SERVER_ERROR, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<LedgerError> for ServerError {
    fn from(value: LedgerError) -> Self {
        Self::Ledger(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_validation_maps_to_422() {
        let res = ServerError::from(LedgerError::SplitMismatch("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn unknown_member_maps_to_422() {
        let res = ServerError::from(LedgerError::UnknownMember("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn not_found_maps_to_404() {
        let res = ServerError::NotFound("x".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_fault_maps_to_500() {
        let res = ServerError::Internal("state lock poisoned".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
