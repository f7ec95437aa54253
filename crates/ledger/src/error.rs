//! The module contains the errors the ledger can raise.
//!
//! All of them are deterministic validation failures: the same input always
//! fails the same way, so callers correct the input instead of retrying.
use thiserror::Error;

/// Ledger custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LedgerError {
    /// Unequal-split amounts do not reconcile with the expense total, or the
    /// participant list is malformed.
    #[error("split mismatch: {0}")]
    SplitMismatch(String),
    /// Percentage split does not sum to 100% within tolerance.
    #[error("percentage mismatch: {0}")]
    PercentageMismatch(String),
    /// A split was requested over an empty participant set.
    #[error("no participants: {0}")]
    NoParticipants(String),
    /// An event references a member id missing from the membership snapshot.
    #[error("unknown member: {0}")]
    UnknownMember(String),
    /// A negative amount, or a non-positive total, in the input set.
    #[error("invalid amount: {0}")]
    NegativeAmount(String),
}
