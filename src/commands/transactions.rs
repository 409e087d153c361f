// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{filter_and_sort, Filter, SortKey, Temporality};
use crate::models::{Installment, Transaction, TransactionDraft, TransactionKind};
use crate::persist::KvStore;
use crate::session::Session;
use crate::utils::{
    fmt_money, maybe_print_json, opt_date, parse_date, parse_decimal, pretty_table, required,
};
use anyhow::Result;
use serde::Serialize;

pub fn handle<K: KvStore>(session: &mut Session<K>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("edit", sub)) => edit(session, sub)?,
        Some(("rm", sub)) => remove(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        _ => {}
    }
    Ok(())
}

/// A blank `--installment` parses to `None`.
fn installment_arg(sub: &clap::ArgMatches) -> Result<Option<Installment>> {
    Ok(sub
        .get_one::<String>("installment")
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<Installment>())
        .transpose()?)
}

fn add<K: KvStore>(session: &mut Session<K>, sub: &clap::ArgMatches) -> Result<()> {
    let desc = required(sub, "desc")?;
    let amount = parse_decimal(required(sub, "amount")?)?;
    let date = parse_date(required(sub, "date")?)?;
    let kind = if sub.get_flag("income") {
        TransactionKind::Income
    } else {
        TransactionKind::Expense
    };

    let mut draft = TransactionDraft::new(desc, amount, date, kind);
    draft.is_future = sub.get_flag("planned");
    draft.card = sub.get_one::<String>("card").cloned();
    draft.category = sub.get_one::<String>("category").cloned();
    draft.installment = installment_arg(sub)?;

    let t = session.add_transaction(draft)?;
    println!(
        "Recorded {} {} on {} '{}' (id {})",
        t.kind,
        fmt_money(&t.amount),
        t.date,
        t.description,
        t.id
    );
    Ok(())
}

/// Starts from the stored record so omitted flags keep their values.
fn edit<K: KvStore>(session: &mut Session<K>, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub
        .get_one::<i64>("id")
        .ok_or_else(|| anyhow::anyhow!("id is required"))?;
    let Some(current) = session.store().get(id) else {
        println!("No transaction with id {}", id);
        return Ok(());
    };
    let mut draft = TransactionDraft::from(current);

    if let Some(desc) = sub.get_one::<String>("desc") {
        draft.description = desc.clone();
    }
    if let Some(amount) = sub.get_one::<String>("amount") {
        draft.amount = parse_decimal(amount)?;
    }
    if let Some(date) = opt_date(sub, "date")? {
        draft.date = date;
    }
    if let Some(kind) = sub.get_one::<String>("kind") {
        draft.kind = kind.parse()?;
    }
    if sub.get_flag("planned") {
        draft.is_future = true;
    }
    if sub.get_flag("settled") {
        draft.is_future = false;
    }
    if let Some(card) = sub.get_one::<String>("card") {
        draft.card = Some(card.clone());
    }
    if let Some(category) = sub.get_one::<String>("category") {
        draft.category = Some(category.clone());
    }
    if sub.get_one::<String>("installment").is_some() {
        draft.installment = installment_arg(sub)?;
    }

    if session.update_transaction(id, draft)? {
        println!("Updated transaction {}", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}

fn remove<K: KvStore>(session: &mut Session<K>, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub
        .get_one::<i64>("id")
        .ok_or_else(|| anyhow::anyhow!("id is required"))?;
    if session.remove_transaction(id)? {
        println!("Removed transaction {}", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}

fn list<K: KvStore>(session: &Session<K>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(session, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                    r.status.clone(),
                    r.card.clone(),
                    r.category.clone(),
                    r.installment.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Id",
                    "Date",
                    "Kind",
                    "Description",
                    "Amount",
                    "Status",
                    "Card",
                    "Category",
                    "Installment",
                ],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub kind: String,
    pub description: String,
    pub amount: String,
    pub status: String,
    pub card: String,
    pub category: String,
    pub installment: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            kind: t.kind.to_string(),
            description: t.description.clone(),
            amount: fmt_money(&t.amount),
            status: if t.is_future { "planned" } else { "settled" }.to_string(),
            card: t.card.clone().unwrap_or_default(),
            category: t.category.clone().unwrap_or_default(),
            installment: t.installment.map(|i| i.to_string()).unwrap_or_default(),
        }
    }
}

pub fn filter_from_args(sub: &clap::ArgMatches) -> Result<(Filter, SortKey)> {
    let temporality = if sub.get_flag("settled") {
        Some(Temporality::Settled)
    } else if sub.get_flag("planned") {
        Some(Temporality::Planned)
    } else {
        None
    };
    let filter = Filter {
        query: sub.get_one::<String>("query").cloned(),
        from: opt_date(sub, "from")?,
        to: opt_date(sub, "to")?,
        category: sub.get_one::<String>("category").cloned(),
        kind: sub
            .get_one::<String>("kind")
            .map(|k| k.parse::<TransactionKind>())
            .transpose()?,
        temporality,
    };
    let sort = match sub.get_one::<String>("sort") {
        Some(s) => s.parse::<SortKey>()?,
        None => SortKey::default(),
    };
    Ok((filter, sort))
}

pub fn query_rows<K: KvStore>(
    session: &Session<K>,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let (filter, sort) = filter_from_args(sub)?;
    let matched = filter_and_sort(session.snapshot(), &filter, sort);
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);
    Ok(matched
        .into_iter()
        .take(limit)
        .map(TransactionRow::from)
        .collect())
}
