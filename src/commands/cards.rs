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
            session.add_card(name)?;
            println!("Added card '{}'", name.trim());
        }
        Some(("list", _)) => {
            let labels = session.cards();
            let data = labels
                .iter()
                .map(|n| {
                    let origin = if labels.is_base(n) { "built-in" } else { "custom" };
                    vec![n.to_string(), origin.to_string()]
                })
                .collect();
            println!("{}", pretty_table(&["Card", "Origin"], data));
        }
        Some(("rm", sub)) => {
            let name = required(sub, "name")?;
            if session.remove_card(name)? {
                println!("Removed card '{}'", name.trim());
            } else {
                println!("No card named '{}'", name.trim());
            }
        }
        _ => {}
    }
    Ok(())
}
