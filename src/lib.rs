// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod commands;
pub mod engine;
pub mod error;
pub mod labels;
pub mod models;
pub mod persist;
pub mod session;
pub mod settings;
pub mod store;
pub mod utils;

pub use error::{Error, Result};
pub use session::Session;
