use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod group {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupNew {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupCreated {
        pub id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupView {
        pub id: Uuid,
        pub name: String,
        pub member_count: usize,
    }
}

pub mod member {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberNew {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberView {
        pub id: Uuid,
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MembersResponse {
        pub members: Vec<MemberView>,
    }
}

pub mod expense {
    use super::*;

    /// Split request, tagged by policy.
    ///
    /// Amounts are integer minor units; percentages are hundredths of a
    /// percent (10000 = 100%). Entry order is the participant order used for
    /// remainder assignment.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(tag = "policy", rename_all = "snake_case")]
    pub enum SplitInput {
        Equal { participants: Vec<Uuid> },
        Unequal { participants: Vec<AmountEntry> },
        Percentage { participants: Vec<PercentEntry> },
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AmountEntry {
        pub member_id: Uuid,
        pub amount_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PercentEntry {
        pub member_id: Uuid,
        pub percent_bp: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub payer_id: Uuid,
        pub amount_minor: i64,
        pub split: SplitInput,
        pub note: Option<String>,
        /// RFC3339 timestamp, including timezone offset (local user time).
        pub occurred_at: DateTime<FixedOffset>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseCreated {
        pub id: Uuid,
        pub shares: Vec<ShareView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ShareView {
        pub member_id: Uuid,
        pub amount_minor: i64,
        pub percent_bp: Option<i64>,
    }
}

pub mod collection {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CollectionNew {
        pub contributor_id: Uuid,
        pub collector_id: Uuid,
        pub amount_minor: i64,
        /// RFC3339 timestamp, including timezone offset (local user time).
        pub occurred_at: DateTime<FixedOffset>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CollectionCreated {
        pub id: Uuid,
    }
}

pub mod settlement {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementNew {
        pub from_member_id: Uuid,
        pub to_member_id: Uuid,
        pub amount_minor: i64,
        pub note: Option<String>,
        /// RFC3339 timestamp, including timezone offset (local user time).
        pub occurred_at: DateTime<FixedOffset>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementCreated {
        pub id: Uuid,
    }
}

pub mod balance {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum BalanceStatus {
        Owed,
        Owes,
        Settled,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceView {
        pub member_id: Uuid,
        /// Signed net position: positive = owed, negative = owes.
        pub amount_minor: i64,
        pub status: BalanceStatus,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalancesResponse {
        pub balances: Vec<BalanceView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SuggestionView {
        pub from_member_id: Uuid,
        pub to_member_id: Uuid,
        pub amount_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SuggestionsResponse {
        pub suggestions: Vec<SuggestionView>,
        /// Sum of the suggested amounts; equals the total of the positive
        /// balances.
        pub total_minor: i64,
    }
}
