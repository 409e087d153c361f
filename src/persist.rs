// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Key-value persistence boundary and the payload schema stored behind it.
//!
//! Every value is JSON wrapped as `{"version": N, "data": ...}`. A bare JSON
//! array is the unversioned layout written before the envelope existed and is
//! read as version 0.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::Transaction;
use crate::settings::Settings;

pub const KEY_TRANSACTIONS: &str = "transactions";
pub const KEY_CATEGORIES: &str = "categories";
pub const KEY_CARDS: &str = "cards";
pub const KEY_SETTINGS: &str = "settings";

pub const SCHEMA_VERSION: u64 = 1;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.pocketbook", "Pocketbook", "pocketbook"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or(Error::NoDataDir)?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir)?;
    Ok(data_dir.join("pocketbook.sqlite"))
}

/// String-keyed blob store.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Blob store kept in a single SQLite table.
pub struct SqliteKv {
    conn: Connection,
}

impl SqliteKv {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            r#"
    CREATE TABLE IF NOT EXISTS kv(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
        )?;
        Ok(SqliteKv { conn })
    }
}

impl KvStore for SqliteKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let v = self
            .conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| r.get(0))
            .optional()?;
        Ok(v)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.conn.execute("DELETE FROM kv WHERE key=?1", params![key])?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    entries: BTreeMap<String, String>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    version: u64,
    data: &'a T,
}

pub fn encode<T: Serialize>(data: &T) -> Result<String> {
    Ok(serde_json::to_string(&Envelope {
        version: SCHEMA_VERSION,
        data,
    })?)
}

/// Splits a stored value into its schema version and payload.
fn open_envelope(raw: &str) -> Result<(u64, Value)> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Array(items) => Ok((0, Value::Array(items))),
        Value::Object(mut obj) => {
            let version = obj
                .get("version")
                .and_then(Value::as_u64)
                .ok_or_else(|| Error::Malformed("missing version".into()))?;
            if version > SCHEMA_VERSION {
                return Err(Error::UnsupportedVersion(version));
            }
            let data = obj
                .remove("data")
                .ok_or_else(|| Error::Malformed("missing data".into()))?;
            Ok((version, data))
        }
        _ => Err(Error::Malformed("expected an object or array".into())),
    }
}

/// Brings a version 0 record up to the current field set.
fn upgrade_legacy_record(mut record: Value) -> Value {
    if let Value::Object(obj) = &mut record {
        obj.entry("kind").or_insert_with(|| Value::from("EXPENSE"));
        obj.entry("isFuture").or_insert(Value::Bool(false));
    }
    record
}

/// Decodes the transaction list, skipping records that fail to decode.
pub fn decode_transactions(raw: &str) -> Result<Vec<Transaction>> {
    let (version, data) = open_envelope(raw)?;
    let Value::Array(records) = data else {
        return Err(Error::Malformed("transactions must be a list".into()));
    };
    let mut out = Vec::with_capacity(records.len());
    for (idx, record) in records.into_iter().enumerate() {
        let record = if version == 0 {
            upgrade_legacy_record(record)
        } else {
            record
        };
        match serde_json::from_value::<Transaction>(record) {
            Ok(t) => out.push(t),
            Err(e) => tracing::warn!(index = idx, error = %e, "skipping unreadable transaction"),
        }
    }
    Ok(out)
}

pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let (_, data) = open_envelope(raw)?;
    Ok(serde_json::from_value(data)?)
}

/// Reads `key` with `decode_fn`, falling back to `T::default()` when the key is
/// absent or unreadable.
pub fn load_or_default<T, F>(kv: &dyn KvStore, key: &str, decode_fn: F) -> T
where
    T: Default,
    F: FnOnce(&str) -> Result<T>,
{
    let raw = match kv.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "could not read stored value, using defaults");
            return T::default();
        }
    };
    match decode_fn(&raw) {
        Ok(v) => {
            tracing::debug!(key, "loaded stored value");
            v
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "could not parse stored value, using defaults");
            T::default()
        }
    }
}

pub fn load_settings(kv: &dyn KvStore) -> Settings {
    load_or_default(kv, KEY_SETTINGS, decode::<Settings>)
}

/// One-shot snapshot of everything the user owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub exported_at: DateTime<Utc>,
    pub transactions: Vec<Transaction>,
    pub categories: Vec<String>,
    pub cards: Vec<String>,
}

pub fn write_json<W: Write>(payload: &ExportPayload, mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, payload)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

pub fn write_csv<W: Write>(transactions: &[Transaction], out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record([
        "id",
        "date",
        "kind",
        "description",
        "amount",
        "planned",
        "card",
        "category",
        "installment",
    ])?;
    for t in transactions {
        wtr.write_record([
            t.id.to_string(),
            t.date.to_string(),
            t.kind.to_string(),
            t.description.clone(),
            t.amount.to_string(),
            t.is_future.to_string(),
            t.card.clone().unwrap_or_default(),
            t.category.clone().unwrap_or_default(),
            t.installment.map(|i| i.to_string()).unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
