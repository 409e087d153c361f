// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::{Transaction, TransactionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temporality {
    Settled,
    Planned,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
    Description,
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "date-desc" => Ok(Self::DateDesc),
            "date-asc" => Ok(Self::DateAsc),
            "amount-desc" => Ok(Self::AmountDesc),
            "amount-asc" => Ok(Self::AmountAsc),
            "description" => Ok(Self::Description),
            other => Err(Error::Validation(format!("Unknown sort '{}'", other))),
        }
    }
}

/// Predicates for the list view. `None` matches everything.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    pub query: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub category: Option<String>,
    pub kind: Option<TransactionKind>,
    pub temporality: Option<Temporality>,
}

impl Filter {
    pub fn matches(&self, t: &Transaction) -> bool {
        if let Some(q) = self.needle() {
            let hit = contains_ci(&t.description, &q)
                || t.category.as_deref().is_some_and(|c| contains_ci(c, &q))
                || t.card.as_deref().is_some_and(|c| contains_ci(c, &q));
            if !hit {
                return false;
            }
        }
        if self.from.is_some_and(|from| t.date < from) {
            return false;
        }
        if self.to.is_some_and(|to| t.date > to) {
            return false;
        }
        if let Some(cat) = &self.category {
            if t.category.as_deref() != Some(cat.as_str()) {
                return false;
            }
        }
        if self.kind.is_some_and(|k| k != t.kind) {
            return false;
        }
        match self.temporality {
            Some(Temporality::Settled) => !t.is_future,
            Some(Temporality::Planned) => t.is_future,
            None => true,
        }
    }

    fn needle(&self) -> Option<String> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }
}

fn contains_ci(hay: &str, needle_lower: &str) -> bool {
    hay.to_lowercase().contains(needle_lower)
}

/// Returns the matching records ordered by `sort`. Equal keys keep their
/// snapshot order.
pub fn filter_and_sort<'a>(
    snapshot: &'a [Transaction],
    filter: &Filter,
    sort: SortKey,
) -> Vec<&'a Transaction> {
    let mut out: Vec<&Transaction> = snapshot.iter().filter(|t| filter.matches(t)).collect();
    match sort {
        SortKey::DateDesc => out.sort_by(|a, b| b.date.cmp(&a.date)),
        SortKey::DateAsc => out.sort_by(|a, b| a.date.cmp(&b.date)),
        SortKey::AmountDesc => out.sort_by(|a, b| b.amount.cmp(&a.amount)),
        SortKey::AmountAsc => out.sort_by(|a, b| a.amount.cmp(&b.amount)),
        SortKey::Description => out.sort_by(|a, b| a.description.cmp(&b.description)),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::{categorized, d, planned, tx};
    use TransactionKind::{Expense, Income};

    fn sample() -> Vec<Transaction> {
        vec![
            categorized(tx(1, "Gasolina", Expense, "60", "2025-07-03"), "Transporte"),
            categorized(tx(2, "Salario", Income, "3000", "2025-07-01"), "Salario"),
            planned(
                categorized(tx(3, "Heladera", Expense, "900", "2025-08-15"), "Otros"),
                Some("Mastercard"),
            ),
            categorized(tx(4, "Cine", Expense, "60", "2025-07-03"), "Ocio"),
        ]
    }

    fn ids(v: &[&Transaction]) -> Vec<i64> {
        v.iter().map(|t| t.id).collect()
    }

    #[test]
    fn query_matches_description_case_insensitively() {
        let snap = sample();
        let f = Filter {
            query: Some("gaso".into()),
            ..Filter::default()
        };
        assert_eq!(ids(&filter_and_sort(&snap, &f, SortKey::default())), vec![1]);
    }

    #[test]
    fn query_matches_category_and_card() {
        let snap = sample();
        let by_card = Filter {
            query: Some("MASTER".into()),
            ..Filter::default()
        };
        assert_eq!(ids(&filter_and_sort(&snap, &by_card, SortKey::default())), vec![3]);
        let by_cat = Filter {
            query: Some("ocio".into()),
            ..Filter::default()
        };
        assert_eq!(ids(&filter_and_sort(&snap, &by_cat, SortKey::default())), vec![4]);
    }

    #[test]
    fn wildcard_returns_everything_and_empty_stays_empty() {
        let snap = sample();
        let all = filter_and_sort(&snap, &Filter::default(), SortKey::DateAsc);
        let mut got = ids(&all);
        got.sort();
        assert_eq!(got, vec![1, 2, 3, 4]);
        assert!(filter_and_sort(&[], &Filter::default(), SortKey::default()).is_empty());
        let blank = Filter {
            query: Some("   ".into()),
            ..Filter::default()
        };
        assert_eq!(filter_and_sort(&snap, &blank, SortKey::default()).len(), 4);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let snap = sample();
        let f = Filter {
            from: Some(d("2025-07-01")),
            to: Some(d("2025-07-03")),
            ..Filter::default()
        };
        assert_eq!(ids(&filter_and_sort(&snap, &f, SortKey::DateAsc)), vec![2, 1, 4]);
        let open_start = Filter {
            to: Some(d("2025-07-01")),
            ..Filter::default()
        };
        assert_eq!(ids(&filter_and_sort(&snap, &open_start, SortKey::default())), vec![2]);
    }

    #[test]
    fn adding_predicates_only_narrows() {
        let snap = sample();
        let mut f = Filter::default();
        let mut last = filter_and_sort(&snap, &f, SortKey::default()).len();
        f.kind = Some(Expense);
        let n = filter_and_sort(&snap, &f, SortKey::default()).len();
        assert!(n <= last);
        last = n;
        f.temporality = Some(Temporality::Settled);
        let n = filter_and_sort(&snap, &f, SortKey::default()).len();
        assert!(n <= last);
        last = n;
        f.category = Some("Ocio".into());
        let n = filter_and_sort(&snap, &f, SortKey::default()).len();
        assert!(n <= last);
        assert_eq!(n, 1);
    }

    #[test]
    fn sorts_are_stable_on_ties() {
        let snap = sample();
        let f = Filter::default();
        // 1 and 4 share date and amount; snapshot order must hold.
        assert_eq!(ids(&filter_and_sort(&snap, &f, SortKey::DateDesc)), vec![3, 1, 4, 2]);
        assert_eq!(ids(&filter_and_sort(&snap, &f, SortKey::AmountAsc)), vec![1, 4, 3, 2]);
        assert_eq!(ids(&filter_and_sort(&snap, &f, SortKey::AmountDesc)), vec![2, 3, 1, 4]);
        assert_eq!(ids(&filter_and_sort(&snap, &f, SortKey::Description)), vec![4, 1, 3, 2]);
    }

    #[test]
    fn sort_key_parses_cli_names() {
        assert_eq!("amount-asc".parse::<SortKey>().unwrap(), SortKey::AmountAsc);
        assert!("random".parse::<SortKey>().is_err());
    }
}
