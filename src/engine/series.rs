// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::engine::totals::Bucket;
use crate::models::Transaction;

pub const DEFAULT_MONTHS: usize = 6;

/// Settled cashflow of one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    pub expense: Decimal,
    pub income: Decimal,
    pub balance: Decimal,
}

impl MonthBucket {
    /// `YYYY-MM` label.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

fn shift_month(year: i32, month: u32, back: usize) -> (i32, u32) {
    let idx = i64::from(year) * 12 + i64::from(month) - 1 - back as i64;
    (idx.div_euclid(12) as i32, (idx.rem_euclid(12) + 1) as u32)
}

/// `n` consecutive months ending with the month of `now`, oldest first.
pub fn trailing_months(snapshot: &[Transaction], n: usize, now: NaiveDate) -> Vec<MonthBucket> {
    (0..n)
        .rev()
        .map(|back| {
            let (year, month) = shift_month(now.year(), now.month(), back);
            let mut sums = Bucket::default();
            for t in snapshot
                .iter()
                .filter(|t| t.is_settled() && t.date.year() == year && t.date.month() == month)
            {
                sums.record(t);
            }
            MonthBucket {
                year,
                month,
                expense: sums.expense,
                income: sums.income,
                balance: sums.balance(),
            }
        })
        .collect()
}
