// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::persist::KvStore;
use crate::session::Session;
use crate::utils::{pretty_table, required};
use anyhow::Result;

pub fn handle<K: KvStore>(session: &mut Session<K>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = required(sub, "name")?;
            session.add_category(name)?;
            println!("Added category '{}'", name.trim());
        }
        Some(("list", _)) => {
            let labels = session.categories();
            let data = labels
                .iter()
                .map(|n| {
                    let origin = if labels.is_base(n) { "built-in" } else { "custom" };
                    vec![n.to_string(), origin.to_string()]
                })
                .collect();
            println!("{}", pretty_table(&["Category", "Origin"], data));
        }
        Some(("rm", sub)) => {
            let name = required(sub, "name")?;
            if session.remove_category(name)? {
                println!("Removed category '{}'", name.trim());
            } else {
                println!("No category named '{}'", name.trim());
            }
        }
        _ => {}
    }
    Ok(())
}
