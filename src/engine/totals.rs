// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Transaction, TransactionKind};

/// Expense and income sums for one temporality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub expense: Decimal,
    pub income: Decimal,
}

impl Bucket {
    /// Adds `t` to its side. Sums saturate at the `Decimal` bounds.
    pub fn record(&mut self, t: &Transaction) {
        let sum = match t.kind {
            TransactionKind::Expense => &mut self.expense,
            TransactionKind::Income => &mut self.income,
        };
        if sum.checked_add(t.amount).is_none() {
            tracing::warn!(id = t.id, amount = %t.amount, "sum overflowed, clamping");
        }
        *sum = sum.saturating_add(t.amount);
    }

    pub fn balance(&self) -> Decimal {
        self.income.saturating_sub(self.expense)
    }

    /// Movement volume irrespective of direction.
    pub fn gross(&self) -> Decimal {
        self.income.saturating_add(self.expense)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub settled: Bucket,
    pub planned: Bucket,
}

impl Totals {
    pub fn balance(&self) -> Decimal {
        self.settled.balance().saturating_add(self.planned.balance())
    }

    pub fn gross(&self) -> Decimal {
        self.settled.gross().saturating_add(self.planned.gross())
    }
}

pub fn totals(snapshot: &[Transaction]) -> Totals {
    snapshot.iter().fold(Totals::default(), |mut acc, t| {
        if t.is_future {
            acc.planned.record(t);
        } else {
            acc.settled.record(t);
        }
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::{categorized, planned, tx};
    use TransactionKind::{Expense, Income};

    #[test]
    fn settled_balance_for_salary_and_food() {
        let snap = vec![
            categorized(tx(1, "Super", Expense, "75.50", "2025-07-20"), "Comida"),
            categorized(tx(2, "Sueldo", Income, "3000", "2025-07-01"), "Salario"),
        ];
        let t = totals(&snap);
        assert_eq!(t.settled.expense, "75.50".parse::<Decimal>().unwrap());
        assert_eq!(t.settled.income, Decimal::from(3000));
        assert_eq!(t.settled.balance().to_string(), "2924.50");
        assert_eq!(t.planned, Bucket::default());
    }

    #[test]
    fn combined_balance_is_sum_of_temporalities() {
        let snap = vec![
            tx(1, "Sueldo", Income, "1000", "2025-07-01"),
            tx(2, "Luz", Expense, "120.10", "2025-07-05"),
            planned(tx(3, "Notebook", Expense, "800", "2025-08-10"), Some("Visa")),
            planned(tx(4, "Bono", Income, "250", "2025-08-15"), None),
        ];
        let t = totals(&snap);
        assert_eq!(t.settled.income - t.settled.expense, t.settled.balance());
        assert_eq!(t.planned.income - t.planned.expense, t.planned.balance());
        assert_eq!(t.balance(), t.settled.balance() + t.planned.balance());
        assert_eq!(t.gross().to_string(), "2170.10");
    }

    #[test]
    fn huge_amounts_clamp_instead_of_panicking() {
        let mut a = tx(1, "Enorme", Expense, "1", "2025-07-01");
        a.amount = Decimal::MAX;
        let mut b = a.clone();
        b.id = 2;
        let mut c = planned(a.clone(), None);
        c.id = 3;
        let t = totals(&[a, b, c]);
        assert_eq!(t.settled.expense, Decimal::MAX);
        assert_eq!(t.settled.balance(), Decimal::MIN);
        assert_eq!(t.balance(), Decimal::MIN);
        assert_eq!(t.gross(), Decimal::MAX);
    }

    #[test]
    fn empty_snapshot_sums_to_zero() {
        let t = totals(&[]);
        assert_eq!(t.balance(), Decimal::ZERO);
        assert_eq!(t.gross(), Decimal::ZERO);
    }
}
