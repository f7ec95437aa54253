//! In-memory group store.
//!
//! This is the stand-in for the durable storage layer: it hands the handlers
//! a complete, consistent snapshot of one group's membership and events.
//! Balances and suggestions are never stored; every read recomputes them
//! from the full event set.

use std::collections::HashMap;

use ledger::{Collection, Expense, Member, Settlement};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct Store {
    groups: HashMap<Uuid, Group>,
}

#[derive(Debug)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub members: Vec<Member>,
    pub expenses: Vec<Expense>,
    pub collections: Vec<Collection>,
    pub settlements: Vec<Settlement>,
}

impl Store {
    pub fn create_group(&mut self, name: String) -> Uuid {
        let id = Uuid::new_v4();
        self.groups.insert(
            id,
            Group {
                id,
                name,
                members: Vec::new(),
                expenses: Vec::new(),
                collections: Vec::new(),
                settlements: Vec::new(),
            },
        );
        id
    }

    pub fn group(&self, id: Uuid) -> Option<&Group> {
        self.groups.get(&id)
    }

    pub fn group_mut(&mut self, id: Uuid) -> Option<&mut Group> {
        self.groups.get_mut(&id)
    }
}

impl Group {
    pub fn has_member(&self, member_id: Uuid) -> bool {
        self.members.iter().any(|member| member.id == member_id)
    }

    /// Removes the expense with the given id; `false` if it was not present.
    pub fn remove_expense(&mut self, expense_id: Uuid) -> bool {
        remove_by(&mut self.expenses, |e| e.id == expense_id)
    }

    pub fn remove_collection(&mut self, collection_id: Uuid) -> bool {
        remove_by(&mut self.collections, |c| c.id == collection_id)
    }

    pub fn remove_settlement(&mut self, settlement_id: Uuid) -> bool {
        remove_by(&mut self.settlements, |s| s.id == settlement_id)
    }
}

fn remove_by<T>(items: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> bool {
    match items.iter().position(matches) {
        Some(index) => {
            items.remove(index);
            true
        }
        None => false,
    }
}
