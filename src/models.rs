// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            other => Err(Error::Validation(format!(
                "Invalid kind '{}', expected expense|income",
                other
            ))),
        }
    }
}

/// Payment `number` of `count` for a purchase split into installments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    pub number: u32,
    pub count: u32,
}

impl fmt::Display for Installment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.number, self.count)
    }
}

impl FromStr for Installment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::Validation(format!("Invalid installment '{}', expected N/M", s));
        let (n, m) = s.split_once('/').ok_or_else(invalid)?;
        let number = n.trim().parse::<u32>().map_err(|_| invalid())?;
        let count = m.trim().parse::<u32>().map_err(|_| invalid())?;
        Ok(Installment { number, count })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub is_future: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment: Option<Installment>,
}

impl Transaction {
    pub fn is_settled(&self) -> bool {
        !self.is_future
    }
}

/// Largest amount a single movement may carry.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA764_0000, 0x0DE0_B6B3, 0, false, 0); // 10^18

/// Every mutable field of a [`Transaction`]; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub is_future: bool,
    pub card: Option<String>,
    pub category: Option<String>,
    pub installment: Option<Installment>,
}

impl TransactionDraft {
    pub fn new(description: &str, amount: Decimal, date: NaiveDate, kind: TransactionKind) -> Self {
        TransactionDraft {
            description: description.to_string(),
            amount,
            date,
            kind,
            is_future: false,
            card: None,
            category: None,
            installment: None,
        }
    }

    pub fn planned(mut self, card: Option<&str>) -> Self {
        self.is_future = true;
        self.card = card.map(str::to_string);
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_installment(mut self, installment: Installment) -> Self {
        self.installment = Some(installment);
        self
    }

    /// Field presence checks the form performs before any mutation.
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(Error::Validation("Description is required".into()));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(format!(
                "Amount must be positive, got {}",
                self.amount
            )));
        }
        if self.amount > MAX_AMOUNT {
            return Err(Error::Validation(format!(
                "Amount must not exceed {}, got {}",
                MAX_AMOUNT, self.amount
            )));
        }
        if let Some(i) = self.installment {
            if i.count == 0 || i.number == 0 || i.number > i.count {
                return Err(Error::Validation(format!("Invalid installment {}", i)));
            }
        }
        Ok(())
    }

    /// Trims text fields, turns blanks into `None` and drops the card of a
    /// settled entry.
    pub fn normalized(mut self) -> Self {
        self.description = self.description.trim().to_string();
        self.category = non_blank(self.category);
        self.card = if self.is_future {
            non_blank(self.card)
        } else {
            None
        };
        self
    }

    pub(crate) fn into_transaction(self, id: i64) -> Transaction {
        Transaction {
            id,
            description: self.description,
            amount: self.amount,
            date: self.date,
            kind: self.kind,
            is_future: self.is_future,
            card: self.card,
            category: self.category,
            installment: self.installment,
        }
    }
}

impl From<&Transaction> for TransactionDraft {
    fn from(t: &Transaction) -> Self {
        TransactionDraft {
            description: t.description.clone(),
            amount: t.amount,
            date: t.date,
            kind: t.kind,
            is_future: t.is_future,
            card: t.card.clone(),
            category: t.category.clone(),
            installment: t.installment,
        }
    }
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
