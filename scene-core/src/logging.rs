// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Logger setup for hosts and demos
//!
//! The crate only emits through the `log` facade. Hosts that do not install
//! their own logger can call [`init`].

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Install an `env_logger` honouring `RUST_LOG`
///
/// Without `RUST_LOG`, `verbose` selects debug output for this crate and info
/// everywhere else. Calling it again after a logger is installed does nothing.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let filter = format!("info,{}={}", env!("CARGO_CRATE_NAME"), level);

    let mut builder = Builder::from_env(Env::default().default_filter_or(filter));
    builder.format_timestamp_millis();

    // Err only means a logger already exists
    let _ = builder.try_init();
}
