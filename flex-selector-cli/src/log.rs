// Copyright 2023 The Flex Selector Authors
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

use std::str::FromStr;

use flex_error::FlexError;
use flex_error::FlexResult;

pub const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Initializes the logger with the specified configuration.
///
/// The level is taken from `level` when given, otherwise from the `RUST_LOG` environment
/// variable, defaulting to "INFO". Output goes to stderr and includes thread names, log
/// levels, line numbers and thread IDs.
pub fn init_logger_with_level(level: Option<&str>) -> FlexResult<()> {
    let level = match level {
        Some(level) => level.to_string(),
        None => std::env::var("RUST_LOG").unwrap_or(String::from(DEFAULT_LOG_LEVEL)),
    };
    let max_level = parse_level(&level)?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_thread_names(true)
        .with_level(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_max_level(max_level)
        .try_init()
        .map_err(|e| FlexError::illegal_argument(format!("logger already initialized: {e}")))
}

pub fn parse_level(level: &str) -> FlexResult<tracing::Level> {
    tracing::Level::from_str(level.trim())
        .map_err(|_| FlexError::config_invalid_value("log_level", level, "expected ERROR, WARN, INFO, DEBUG or TRACE"))
}
