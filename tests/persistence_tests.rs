// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketbook::models::{Installment, TransactionDraft, TransactionKind};
use pocketbook::persist::{KvStore, SqliteKv, KEY_CARDS, KEY_TRANSACTIONS};
use pocketbook::Session;
use rust_decimal::Decimal;
use tempfile::tempdir;

#[test]
fn sqlite_session_survives_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pocketbook.sqlite");

    let written = {
        let mut s = Session::open(SqliteKv::open(&path).unwrap());
        s.add_category("Mascotas").unwrap();
        s.add_transaction(
            TransactionDraft::new(
                "Alimento",
                "40.10".parse().unwrap(),
                NaiveDate::from_ymd_opt(2025, 7, 4).unwrap(),
                TransactionKind::Expense,
            )
            .with_category("Mascotas"),
        )
        .unwrap();
        s.add_transaction(
            TransactionDraft::new(
                "Lavarropas",
                Decimal::from(600),
                NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(),
                TransactionKind::Expense,
            )
            .planned(Some("Mastercard"))
            .with_installment(Installment { number: 2, count: 3 }),
        )
        .unwrap();
        s.snapshot().to_vec()
    };

    let s = Session::open(SqliteKv::open(&path).unwrap());
    assert_eq!(s.snapshot(), written.as_slice());
    assert!(s.categories().contains("Mascotas"));
}

#[test]
fn removing_a_category_keeps_tagged_transactions() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pocketbook.sqlite");
    let mut s = Session::open(SqliteKv::open(&path).unwrap());
    s.add_category("Regalos").unwrap();
    let t = s
        .add_transaction(
            TransactionDraft::new(
                "Cumple",
                Decimal::from(25),
                NaiveDate::from_ymd_opt(2025, 7, 9).unwrap(),
                TransactionKind::Expense,
            )
            .with_category("Regalos"),
        )
        .unwrap();
    assert!(s.remove_category("Regalos").unwrap());
    assert!(s.remove_category("Comida").is_err());

    let s = Session::open(SqliteKv::open(&path).unwrap());
    assert!(!s.categories().contains("Regalos"));
    assert_eq!(s.store().get(t.id).unwrap().category.as_deref(), Some("Regalos"));
}

#[test]
fn unreadable_keys_fall_back_independently() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pocketbook.sqlite");
    {
        let mut kv = SqliteKv::open(&path).unwrap();
        kv.set(KEY_TRANSACTIONS, "definitely not json").unwrap();
        kv.set(KEY_CARDS, r#"{"version":1,"data":["Naranja"]}"#).unwrap();
    }
    let s = Session::open(SqliteKv::open(&path).unwrap());
    assert!(s.snapshot().is_empty());
    assert!(s.cards().contains("Naranja"));
    assert!(s.cards().contains("Visa"));
}

#[test]
fn legacy_unversioned_transactions_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pocketbook.sqlite");
    {
        let mut kv = SqliteKv::open(&path).unwrap();
        kv.set(
            KEY_TRANSACTIONS,
            r#"[
                {"id": 1720000000000, "description": "Gasolina", "amount": 60, "date": "2025-07-03", "isFuture": false, "category": "Transporte"},
                {"id": 1720000000001, "description": "Cuota TV", "amount": 150.5, "date": "2025-08-03", "isFuture": true, "card": "Visa"}
            ]"#,
        )
        .unwrap();
    }
    let mut s = Session::open(SqliteKv::open(&path).unwrap());
    assert_eq!(s.snapshot().len(), 2);
    assert!(s.snapshot().iter().all(|t| t.kind == TransactionKind::Expense));

    // New ids never collide with hydrated ones.
    let t = s
        .add_transaction(TransactionDraft::new(
            "Pan",
            Decimal::ONE,
            NaiveDate::from_ymd_opt(2025, 7, 5).unwrap(),
            TransactionKind::Expense,
        ))
        .unwrap();
    assert!(t.id > 1720000000001);
}
