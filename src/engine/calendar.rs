// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::engine::totals::Bucket;
use crate::error::Error;
use crate::models::Transaction;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Sunday => "sunday",
        }
    }
}

impl FromStr for WeekStart {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" | "mon" => Ok(Self::Monday),
            "sunday" | "sun" => Ok(Self::Sunday),
            other => Err(Error::Validation(format!(
                "Invalid week start '{}', expected monday|sunday",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CalendarView {
    Week,
    #[default]
    Month,
}

impl FromStr for CalendarView {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(Error::Validation(format!(
                "Invalid view '{}', expected week|month",
                other
            ))),
        }
    }
}

/// Inclusive, lazily walked range of days.
#[derive(Debug, Clone)]
pub struct DayRange {
    next: Option<NaiveDate>,
    last: NaiveDate,
}

impl DayRange {
    pub fn new(first: NaiveDate, last: NaiveDate) -> Self {
        DayRange {
            next: (first <= last).then_some(first),
            last,
        }
    }

    pub fn for_view(reference: NaiveDate, view: CalendarView, week_start: WeekStart) -> Self {
        match view {
            CalendarView::Week => {
                let offset = match week_start {
                    WeekStart::Monday => reference.weekday().num_days_from_monday(),
                    WeekStart::Sunday => reference.weekday().num_days_from_sunday(),
                };
                let first = reference - Duration::days(i64::from(offset));
                DayRange::new(first, first + Duration::days(6))
            }
            CalendarView::Month => {
                let first = reference.with_day(1).unwrap_or(reference);
                DayRange::new(first, last_day_of_month(first))
            }
        }
    }
}

impl Iterator for DayRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let cur = self.next?;
        self.next = cur.succ_opt().filter(|d| *d <= self.last);
        Some(cur)
    }
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(date)
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay<'a> {
    pub date: NaiveDate,
    pub transactions: Vec<&'a Transaction>,
    /// Settled expenses on this day.
    pub expense: Decimal,
    /// Settled income on this day.
    pub income: Decimal,
}

pub fn calendar<'a>(
    snapshot: &'a [Transaction],
    reference: NaiveDate,
    view: CalendarView,
    week_start: WeekStart,
) -> Vec<CalendarDay<'a>> {
    DayRange::for_view(reference, view, week_start)
        .map(|date| {
            let transactions: Vec<&Transaction> =
                snapshot.iter().filter(|t| t.date == date).collect();
            let mut sums = Bucket::default();
            for t in transactions.iter().filter(|t| t.is_settled()) {
                sums.record(t);
            }
            CalendarDay {
                date,
                transactions,
                expense: sums.expense,
                income: sums.income,
            }
        })
        .collect()
}
