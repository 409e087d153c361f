// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{calendar, totals, trailing_months, CalendarView, MonthBucket, Totals};
use crate::persist::KvStore;
use crate::session::Session;
use crate::utils::{fmt_money, maybe_print_json, opt_date, pretty_table, today};
use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle<K: KvStore>(session: &Session<K>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(session, sub)?,
        Some(("calendar", sub)) => calendar_view(session, sub)?,
        Some(("series", sub)) => series(session, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct SummaryRow {
    pub scope: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
    pub gross: Decimal,
}

pub fn summary_rows(t: &Totals) -> Vec<SummaryRow> {
    vec![
        SummaryRow {
            scope: "settled".into(),
            income: t.settled.income,
            expense: t.settled.expense,
            balance: t.settled.balance(),
            gross: t.settled.gross(),
        },
        SummaryRow {
            scope: "planned".into(),
            income: t.planned.income,
            expense: t.planned.expense,
            balance: t.planned.balance(),
            gross: t.planned.gross(),
        },
        SummaryRow {
            scope: "combined".into(),
            income: t.settled.income + t.planned.income,
            expense: t.settled.expense + t.planned.expense,
            balance: t.balance(),
            gross: t.gross(),
        },
    ]
}

fn summary<K: KvStore>(session: &Session<K>, sub: &clap::ArgMatches) -> Result<()> {
    let data = summary_rows(&totals(session.snapshot()));
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.scope.clone(),
                    fmt_money(&r.income),
                    fmt_money(&r.expense),
                    fmt_money(&r.balance),
                    fmt_money(&r.gross),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Scope", "Income", "Expense", "Balance", "Total"], rows)
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct CalendarRow {
    pub date: NaiveDate,
    pub weekday: String,
    pub transactions: usize,
    pub income: Decimal,
    pub expense: Decimal,
}

pub fn calendar_rows<K: KvStore>(
    session: &Session<K>,
    sub: &clap::ArgMatches,
) -> Result<Vec<CalendarRow>> {
    let reference = opt_date(sub, "date")?.unwrap_or_else(today);
    let view = match sub.get_one::<String>("view") {
        Some(v) => v.parse::<CalendarView>()?,
        None => CalendarView::default(),
    };
    let days = calendar(
        session.snapshot(),
        reference,
        view,
        session.settings().week_start,
    );
    Ok(days
        .into_iter()
        .map(|d| CalendarRow {
            date: d.date,
            weekday: d.date.format("%a").to_string(),
            transactions: d.transactions.len(),
            income: d.income,
            expense: d.expense,
        })
        .collect())
}

fn calendar_view<K: KvStore>(session: &Session<K>, sub: &clap::ArgMatches) -> Result<()> {
    let data = calendar_rows(session, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.date.to_string(),
                    r.weekday.clone(),
                    r.transactions.to_string(),
                    fmt_money(&r.income),
                    fmt_money(&r.expense),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Day", "Entries", "Income", "Expense"], rows)
        );
    }
    Ok(())
}

pub fn series_rows<K: KvStore>(
    session: &Session<K>,
    sub: &clap::ArgMatches,
) -> Result<Vec<MonthBucket>> {
    let months = sub
        .get_one::<usize>("months")
        .copied()
        .unwrap_or(session.settings().series_months);
    let now = opt_date(sub, "now")?.unwrap_or_else(today);
    Ok(trailing_months(session.snapshot(), months, now))
}

fn series<K: KvStore>(session: &Session<K>, sub: &clap::ArgMatches) -> Result<()> {
    let data = series_rows(session, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|b| {
                vec![
                    b.label(),
                    fmt_money(&b.income),
                    fmt_money(&b.expense),
                    fmt_money(&b.balance),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expense", "Balance"], rows)
        );
    }
    Ok(())
}
