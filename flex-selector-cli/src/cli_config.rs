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

use std::path::Path;

use config::Config;
use flex_error::FlexError;
use flex_error::FlexResult;
use flex_selector::filter::DEFAULT_CACHE_CAPACITY;
use serde::Deserialize;
use serde::Serialize;

/// Prefix of the environment variables overriding the config file, e.g.
/// `FLEX_SELECTOR_CACHE_CAPACITY=64`.
pub const ENV_PREFIX: &str = "FLEX_SELECTOR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorCliConfig {
    /// Log level; falls back to `RUST_LOG` and then `INFO` when unset.
    pub log_level: Option<String>,
    /// Compiled selectors kept by `eval`; zero disables the cache.
    pub cache_capacity: usize,
    /// Print the parenthesized form of each selector next to its `eval` result.
    pub canonical_output: bool,
}

impl Default for SelectorCliConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            canonical_output: false,
        }
    }
}

impl SelectorCliConfig {
    /// Loads the optional TOML file, then overlays `FLEX_SELECTOR_*` environment variables.
    pub fn load(config_file: Option<&Path>) -> FlexResult<Self> {
        let mut builder = Config::builder();
        if let Some(path) = config_file {
            if !path.is_file() {
                return Err(FlexError::illegal_argument(format!(
                    "config file does not exist or is not a file: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(config::File::from(path));
        }
        let config = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;
        Ok(config.try_deserialize::<SelectorCliConfig>()?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn toml_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_file() {
        let config = SelectorCliConfig::default();
        assert_eq!(config.log_level, None);
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
        assert!(!config.canonical_output);
    }

    #[test]
    fn loads_toml_file() {
        let file = toml_file("log_level = \"DEBUG\"\ncache_capacity = 16\ncanonical_output = true\n");
        let config = SelectorCliConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("DEBUG"));
        assert_eq!(config.cache_capacity, 16);
        assert!(config.canonical_output);
    }

    #[test]
    fn missing_keys_keep_defaults() {
        let file = toml_file("canonical_output = true\n");
        let config = SelectorCliConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
        assert!(config.canonical_output);
    }

    #[test]
    fn rejects_missing_file() {
        let err = SelectorCliConfig::load(Some(Path::new("/nonexistent/flex-selector.toml"))).unwrap_err();
        assert!(matches!(err, FlexError::IllegalArgument(_)));
    }

    #[test]
    fn rejects_malformed_values() {
        let file = toml_file("cache_capacity = \"many\"\n");
        let err = SelectorCliConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, FlexError::ConfigParseFailed { .. }));
    }
}
