// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use crate::persist::{write_csv, write_json, KvStore};
use crate::session::Session;
use crate::utils::required;
use anyhow::{bail, Context, Result};

pub fn handle<K: KvStore>(session: &Session<K>, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|f| f.to_lowercase())
        .unwrap_or_else(|| "json".to_string());
    let out = required(sub, "out")?;
    if fmt != "json" && fmt != "csv" {
        bail!("Unknown format: {} (use json|csv)", fmt);
    }

    let writer: Box<dyn Write> = if out == "-" {
        Box::new(io::stdout().lock())
    } else {
        let file = File::create(out).with_context(|| format!("Create {}", out))?;
        Box::new(BufWriter::new(file))
    };

    if fmt == "csv" {
        write_csv(session.snapshot(), writer)?;
    } else {
        write_json(&session.export_payload(), writer)?;
    }
    tracing::info!(format = %fmt, path = %out, "export written");
    if out != "-" {
        println!("Exported {} transactions to {}", session.snapshot().len(), out);
    }
    Ok(())
}
