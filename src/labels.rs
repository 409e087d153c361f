// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{Error, Result};

pub const BASE_CATEGORIES: &[&str] = &[
    "Comida",
    "Servicios",
    "Ocio",
    "Transporte",
    "Salud",
    "Otros",
    "Salario",
];

pub const BASE_CARDS: &[&str] = &["Visa", "Mastercard", "Amex"];

/// A user-editable list of names with a fixed built-in subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    base: &'static [&'static str],
    custom: Vec<String>,
}

impl LabelSet {
    pub fn new(base: &'static [&'static str]) -> Self {
        LabelSet {
            base,
            custom: Vec::new(),
        }
    }

    pub fn categories() -> Self {
        Self::new(BASE_CATEGORIES)
    }

    pub fn cards() -> Self {
        Self::new(BASE_CARDS)
    }

    /// Rebuilds a set from persisted user entries. Blank entries and entries
    /// that collide with the base list or with each other are dropped.
    pub fn with_custom(base: &'static [&'static str], custom: Vec<String>) -> Self {
        let mut set = Self::new(base);
        for name in custom {
            if let Err(e) = set.add(&name) {
                tracing::warn!(name = %name, error = %e, "dropping stored label");
            }
        }
        set
    }

    pub fn contains(&self, name: &str) -> bool {
        self.iter().any(|n| n.eq_ignore_ascii_case(name.trim()))
    }

    /// Resolves `name` to the stored spelling.
    pub fn canonical(&self, name: &str) -> Option<&str> {
        self.iter().find(|n| n.eq_ignore_ascii_case(name.trim()))
    }

    pub fn is_base(&self, name: &str) -> bool {
        self.base.iter().any(|n| n.eq_ignore_ascii_case(name.trim()))
    }

    pub fn add(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("Name is required".into()));
        }
        if self.contains(name) {
            return Err(Error::DuplicateLabel(name.to_string()));
        }
        self.custom.push(name.to_string());
        Ok(())
    }

    /// Removes a user-added entry. Returns `false` if it was not present.
    pub fn remove(&mut self, name: &str) -> Result<bool> {
        if self.is_base(name) {
            return Err(Error::BaseLabel(name.trim().to_string()));
        }
        let before = self.custom.len();
        self.custom.retain(|n| !n.eq_ignore_ascii_case(name.trim()));
        Ok(self.custom.len() != before)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.base.iter().copied().chain(self.custom.iter().map(String::as_str))
    }

    pub fn custom(&self) -> &[String] {
        &self.custom
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }
}
