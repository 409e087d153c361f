// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Utc;

use crate::error::{Error, Result};
use crate::labels::{LabelSet, BASE_CARDS, BASE_CATEGORIES};
use crate::models::{Transaction, TransactionDraft};
use crate::persist::{
    self, decode, decode_transactions, encode, load_or_default, ExportPayload, KvStore,
    KEY_CARDS, KEY_CATEGORIES, KEY_SETTINGS, KEY_TRANSACTIONS,
};
use crate::settings::Settings;
use crate::store::TransactionStore;

/// Owns all user state for one run and writes it back after every mutation.
pub struct Session<K: KvStore> {
    kv: K,
    store: TransactionStore,
    categories: LabelSet,
    cards: LabelSet,
    settings: Settings,
}

impl<K: KvStore> Session<K> {
    /// Hydrates from `kv`. Unreadable keys fall back to their defaults.
    pub fn open(kv: K) -> Self {
        let transactions = load_or_default(&kv, KEY_TRANSACTIONS, decode_transactions);
        let categories = load_or_default(&kv, KEY_CATEGORIES, decode::<Vec<String>>);
        let cards = load_or_default(&kv, KEY_CARDS, decode::<Vec<String>>);
        let settings = persist::load_settings(&kv);
        tracing::debug!(
            transactions = transactions.len(),
            categories = categories.len(),
            cards = cards.len(),
            "session opened"
        );
        Session {
            store: TransactionStore::from_transactions(transactions),
            categories: LabelSet::with_custom(BASE_CATEGORIES, categories),
            cards: LabelSet::with_custom(BASE_CARDS, cards),
            settings,
            kv,
        }
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    pub fn snapshot(&self) -> &[Transaction] {
        self.store.snapshot()
    }

    pub fn categories(&self) -> &LabelSet {
        &self.categories
    }

    pub fn cards(&self) -> &LabelSet {
        &self.cards
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn into_kv(self) -> K {
        self.kv
    }

    /// Normalizes and validates a draft, resolving labels to their stored
    /// spelling. Categories and cards must come from the configured lists,
    /// except for a label `current` already carries.
    fn accept(
        &self,
        draft: TransactionDraft,
        current: Option<&Transaction>,
    ) -> Result<TransactionDraft> {
        let mut draft = draft.normalized();
        draft.validate()?;
        if let Some(cat) = draft.category.take() {
            let kept = current.and_then(|t| t.category.as_deref());
            let name = resolve_label(&self.categories, &cat, kept)
                .ok_or_else(|| Error::UnknownCategory(cat.clone()))?;
            draft.category = Some(name);
        }
        if let Some(card) = draft.card.take() {
            let kept = current.and_then(|t| t.card.as_deref());
            let name = resolve_label(&self.cards, &card, kept)
                .ok_or_else(|| Error::UnknownCard(card.clone()))?;
            draft.card = Some(name);
        }
        Ok(draft)
    }

    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<Transaction> {
        let draft = self.accept(draft, None)?;
        let mut next = self.store.clone();
        let created = next.add(draft);
        self.commit_store(next)?;
        Ok(created)
    }

    /// Returns `false` when `id` is unknown; nothing is written in that case.
    pub fn update_transaction(&mut self, id: i64, draft: TransactionDraft) -> Result<bool> {
        let Some(current) = self.store.get(id) else {
            return Ok(false);
        };
        let draft = self.accept(draft, Some(current))?;
        let mut next = self.store.clone();
        next.update(id, draft);
        self.commit_store(next)?;
        Ok(true)
    }

    pub fn remove_transaction(&mut self, id: i64) -> Result<bool> {
        let mut next = self.store.clone();
        if !next.remove(id) {
            return Ok(false);
        }
        self.commit_store(next)?;
        Ok(true)
    }

    pub fn add_category(&mut self, name: &str) -> Result<()> {
        let mut next = self.categories.clone();
        next.add(name)?;
        self.save_labels(KEY_CATEGORIES, &next)?;
        self.categories = next;
        Ok(())
    }

    pub fn remove_category(&mut self, name: &str) -> Result<bool> {
        let mut next = self.categories.clone();
        if !next.remove(name)? {
            return Ok(false);
        }
        self.save_labels(KEY_CATEGORIES, &next)?;
        self.categories = next;
        Ok(true)
    }

    pub fn add_card(&mut self, name: &str) -> Result<()> {
        let mut next = self.cards.clone();
        next.add(name)?;
        self.save_labels(KEY_CARDS, &next)?;
        self.cards = next;
        Ok(())
    }

    pub fn remove_card(&mut self, name: &str) -> Result<bool> {
        let mut next = self.cards.clone();
        if !next.remove(name)? {
            return Ok(false);
        }
        self.save_labels(KEY_CARDS, &next)?;
        self.cards = next;
        Ok(true)
    }

    pub fn update_settings(&mut self, settings: Settings) -> Result<()> {
        let raw = encode(&settings)?;
        self.kv.set(KEY_SETTINGS, &raw)?;
        self.settings = settings;
        Ok(())
    }

    pub fn export_payload(&self) -> ExportPayload {
        ExportPayload {
            exported_at: Utc::now(),
            transactions: self.store.snapshot().to_vec(),
            categories: self.categories.to_vec(),
            cards: self.cards.to_vec(),
        }
    }

    /// Persists `next` and only then makes it the live store.
    fn commit_store(&mut self, next: TransactionStore) -> Result<()> {
        let raw = encode(&next.snapshot())?;
        self.kv.set(KEY_TRANSACTIONS, &raw)?;
        self.store = next;
        Ok(())
    }

    fn save_labels(&mut self, key: &str, labels: &LabelSet) -> Result<()> {
        let raw = encode(&labels.custom())?;
        self.kv.set(key, &raw)
    }
}

fn resolve_label(labels: &LabelSet, name: &str, kept: Option<&str>) -> Option<String> {
    match labels.canonical(name) {
        Some(canonical) => Some(canonical.to_string()),
        None => kept.filter(|k| *k == name).map(str::to_string),
    }
}
