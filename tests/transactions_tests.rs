// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketbook::persist::MemoryKv;
use pocketbook::{cli, commands::transactions, Session};

fn run(session: &mut Session<MemoryKv>, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["pocketbook", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("tx", tx_m)) => transactions::handle(session, tx_m),
        _ => panic!("no tx subcommand"),
    }
}

fn list(session: &Session<MemoryKv>, args: &[&str]) -> Vec<transactions::TransactionRow> {
    let mut argv = vec!["pocketbook", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            return transactions::query_rows(session, list_m).unwrap();
        }
    }
    panic!("no list subcommand");
}

fn setup() -> Session<MemoryKv> {
    let mut s = Session::open(MemoryKv::new());
    run(&mut s, &["add", "--desc", "Gasolina", "--amount", "60", "--date", "2025-07-03", "--category", "Transporte"]).unwrap();
    run(&mut s, &["add", "--desc", "Salario", "--amount", "3000", "--date", "2025-07-01", "--income", "--category", "Salario"]).unwrap();
    run(&mut s, &["add", "--desc", "Heladera", "--amount", "900", "--date", "2025-08-15", "--planned", "--card", "Visa", "--installment", "1/6"]).unwrap();
    s
}

#[test]
fn query_selects_only_matching_description() {
    let s = setup();
    let rows = list(&s, &["--query", "gaso"]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "Gasolina");
}

#[test]
fn default_order_is_newest_first_and_limit_applies() {
    let s = setup();
    let rows = list(&s, &[]);
    let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, vec!["2025-08-15", "2025-07-03", "2025-07-01"]);
    let rows = list(&s, &["--limit", "2", "--sort", "amount-asc"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].amount, "60.00");
}

#[test]
fn planned_filter_and_card_display() {
    let s = setup();
    let rows = list(&s, &["--planned"]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, "planned");
    assert_eq!(rows[0].card, "Visa");
    assert_eq!(rows[0].installment, "1/6");
    let rows = list(&s, &["--settled", "--kind", "income"]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, "Salario");
}

#[test]
fn edit_keeps_unspecified_fields() {
    let mut s = setup();
    let id = list(&s, &["--query", "gaso"])[0].id;
    run(&mut s, &["edit", id.to_string().as_str(), "--amount", "72.25"]).unwrap();
    let t = s.store().get(id).unwrap();
    assert_eq!(t.amount.to_string(), "72.25");
    assert_eq!(t.description, "Gasolina");
    assert_eq!(t.category.as_deref(), Some("Transporte"));
}

#[test]
fn empty_installment_clears_it_on_edit() {
    let mut s = setup();
    let id = list(&s, &["--planned"])[0].id;
    run(&mut s, &["edit", id.to_string().as_str(), "--installment", "2/6"]).unwrap();
    assert_eq!(s.store().get(id).unwrap().installment.map(|i| i.to_string()).as_deref(), Some("2/6"));
    run(&mut s, &["edit", id.to_string().as_str(), "--installment", ""]).unwrap();
    let t = s.store().get(id).unwrap();
    assert_eq!(t.installment, None);
    assert_eq!(t.card.as_deref(), Some("Visa"));
}

#[test]
fn removed_category_does_not_block_edits() {
    let mut s = setup();
    s.add_category("Mascotas").unwrap();
    run(&mut s, &["add", "--desc", "Alimento", "--amount", "10", "--date", "2025-07-04", "--category", "Mascotas"]).unwrap();
    s.remove_category("Mascotas").unwrap();
    let id = list(&s, &["--query", "alimento"])[0].id;
    run(&mut s, &["edit", id.to_string().as_str(), "--amount", "12"]).unwrap();
    let t = s.store().get(id).unwrap();
    assert_eq!(t.amount.to_string(), "12");
    assert_eq!(t.category.as_deref(), Some("Mascotas"));
}

#[test]
fn settling_a_planned_entry_drops_its_card() {
    let mut s = setup();
    let id = list(&s, &["--planned"])[0].id;
    run(&mut s, &["edit", id.to_string().as_str(), "--settled"]).unwrap();
    let t = s.store().get(id).unwrap();
    assert!(!t.is_future);
    assert_eq!(t.card, None);
}

#[test]
fn edit_of_unknown_id_changes_nothing() {
    let mut s = setup();
    let before = serde_json::to_string(s.snapshot()).unwrap();
    run(&mut s, &["edit", "12345", "--desc", "Nada"]).unwrap();
    run(&mut s, &["rm", "12345"]).unwrap();
    assert_eq!(serde_json::to_string(s.snapshot()).unwrap(), before);
    assert_eq!(s.snapshot().len(), 3);
}

#[test]
fn invalid_input_is_rejected_without_mutation() {
    let mut s = setup();
    assert!(run(&mut s, &["add", "--desc", "Cero", "--amount", "0", "--date", "2025-07-03"]).is_err());
    assert!(run(&mut s, &["add", "--desc", "Fecha", "--amount", "5", "--date", "03/07/2025"]).is_err());
    assert!(run(&mut s, &["add", "--desc", "Raro", "--amount", "5", "--date", "2025-07-03", "--category", "Inventada"]).is_err());
    assert_eq!(s.snapshot().len(), 3);
}

#[test]
fn remove_deletes_by_id() {
    let mut s = setup();
    let id = list(&s, &["--query", "salario"])[0].id;
    run(&mut s, &["rm", id.to_string().as_str()]).unwrap();
    assert!(list(&s, &["--query", "salario"]).is_empty());
}
