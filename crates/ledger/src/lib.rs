//! Pure ledger computation core for a group sharing recurring costs
//! (a "mess").
//!
//! Three components composed leaf-first, each a pure function over in-memory
//! data:
//!
//! 1. [`compute_split`] — one expense total into per-participant shares,
//!    exact to the minor unit under every policy.
//! 2. [`compute_balances`] — the full event history into one signed net
//!    balance per member.
//! 3. [`suggest_settlements`] — a balance vector into the point-to-point
//!    payments that zero it.
//!
//! The core performs no I/O, holds no state and never logs; callers assemble
//! a complete snapshot for one group, invoke the pipeline and discard the
//! intermediate results. Consistency comes from recomputation, not caching.

pub use balances::{BalanceStatus, MemberBalances, compute_balances};
pub use error::LedgerError;
pub use events::{Collection, Expense, Settlement, Share};
pub use members::Member;
pub use money::MoneyCents;
pub use split::{PERCENT_SCALE, PERCENT_TOLERANCE_BP, SplitPolicy, compute_split};
pub use suggestions::{PaymentSuggestion, suggest_settlements};

mod balances;
mod error;
mod events;
mod members;
mod money;
mod split;
mod suggestions;

type ResultLedger<T> = Result<T, LedgerError>;
