// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::{Deserialize, Serialize};

use crate::engine::calendar::WeekStart;
use crate::engine::series::DEFAULT_MONTHS;

/// User preferences persisted next to the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub week_start: WeekStart,
    pub series_months: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            week_start: WeekStart::Monday,
            series_months: DEFAULT_MONTHS,
        }
    }
}
