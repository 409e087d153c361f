// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::WeekStart;
use crate::persist::KvStore;
use crate::session::Session;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle<K: KvStore>(session: &mut Session<K>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let s = session.settings();
            let data = vec![
                vec!["week-start".to_string(), s.week_start.as_str().to_string()],
                vec!["series-months".to_string(), s.series_months.to_string()],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], data));
        }
        Some(("set", sub)) => {
            let mut s = session.settings();
            if let Some(ws) = sub.get_one::<String>("week-start") {
                s.week_start = ws.parse::<WeekStart>()?;
            }
            if let Some(n) = sub.get_one::<usize>("series-months") {
                s.series_months = *n;
            }
            session.update_settings(s)?;
            println!("Settings saved");
        }
        _ => {}
    }
    Ok(())
}
