// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;

use crate::models::{Transaction, TransactionDraft};

/// Clock used to derive ids, in milliseconds since the Unix epoch.
pub type Clock = fn() -> i64;

fn wall_clock() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Authoritative in-memory collection of transactions.
///
/// The store applies mutations only; field validation is the caller's job.
#[derive(Debug, Clone)]
pub struct TransactionStore {
    items: Vec<Transaction>,
    last_id: i64,
    clock: Clock,
}

impl Default for TransactionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::with_clock(wall_clock)
    }

    pub fn with_clock(clock: Clock) -> Self {
        TransactionStore {
            items: Vec::new(),
            last_id: 0,
            clock,
        }
    }

    /// Hydrates a store from previously persisted records. A record whose id
    /// was already seen is dropped.
    pub fn from_transactions(items: Vec<Transaction>) -> Self {
        let mut seen = HashSet::new();
        let items: Vec<Transaction> = items
            .into_iter()
            .filter(|t| {
                let fresh = seen.insert(t.id);
                if !fresh {
                    tracing::warn!(id = t.id, "dropping stored transaction with duplicate id");
                }
                fresh
            })
            .collect();
        let mut store = Self::new();
        store.last_id = items.iter().map(|t| t.id).max().unwrap_or(0);
        store.items = items;
        store
    }

    fn next_id(&mut self) -> i64 {
        let now = (self.clock)();
        self.last_id = if now > self.last_id {
            now
        } else {
            self.last_id + 1
        };
        self.last_id
    }

    pub fn add(&mut self, draft: TransactionDraft) -> Transaction {
        let id = self.next_id();
        let created = draft.into_transaction(id);
        self.items.push(created.clone());
        tracing::debug!(id, "transaction added");
        created
    }

    /// Replaces every mutable field of the record with `id`. Returns `false`
    /// when no such record exists.
    pub fn update(&mut self, id: i64, draft: TransactionDraft) -> bool {
        match self.items.iter_mut().find(|t| t.id == id) {
            Some(slot) => {
                *slot = draft.into_transaction(id);
                tracing::debug!(id, "transaction updated");
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        let removed = self.items.len() != before;
        if removed {
            tracing::debug!(id, "transaction removed");
        }
        removed
    }

    pub fn get(&self, id: i64) -> Option<&Transaction> {
        self.items.iter().find(|t| t.id == id)
    }

    pub fn snapshot(&self) -> &[Transaction] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
