// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),
    #[error("category '{0}' is not in the configured list")]
    UnknownCategory(String),
    #[error("card '{0}' is not in the configured list")]
    UnknownCard(String),
    #[error("'{0}' already exists")]
    DuplicateLabel(String),
    #[error("'{0}' is a built-in entry and cannot be removed")]
    BaseLabel(String),
    #[error("payload version {0} is newer than this build understands")]
    UnsupportedVersion(u64),
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("could not determine platform-specific data dir")]
    NoDataDir,
    #[error("storage error")]
    Storage(#[from] rusqlite::Error),
    #[error("could not encode payload")]
    Encoding(#[from] serde_json::Error),
    #[error("i/o error")]
    Io(#[from] std::io::Error),
    #[error("csv error")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
