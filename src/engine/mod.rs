// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only views derived from a snapshot of transactions.
//!
//! Every function here borrows the snapshot and allocates its own output.

pub mod calendar;
pub mod filter;
pub mod series;
pub mod totals;

pub use calendar::{calendar, CalendarDay, CalendarView, DayRange, WeekStart};
pub use filter::{filter_and_sort, Filter, SortKey, Temporality};
pub use series::{trailing_months, MonthBucket};
pub use totals::{totals, Bucket, Totals};
