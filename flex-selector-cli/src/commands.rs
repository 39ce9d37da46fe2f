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

use std::fs;
use std::path::Path;
use std::sync::Arc;

use flex_error::FlexError;
use flex_error::FlexResult;
use flex_selector::constant::expression_type::ExpressionType;
use flex_selector::expression::evaluation_context::MessageEvaluationContext;
use flex_selector::filter::Filter;
use flex_selector::filter::SelectorCache;
use flex_selector::filter::SqlFilter;
use flex_selector::Value;
use tracing::debug;
use tracing::info;

use crate::cli_config::SelectorCliConfig;
use crate::command_line::Commands;

/// Runs a command and returns what it prints on success.
pub trait CommandExecute {
    fn execute(&self, config: &SelectorCliConfig) -> FlexResult<String>;
}

impl CommandExecute for Commands {
    fn execute(&self, config: &SelectorCliConfig) -> FlexResult<String> {
        match self {
            Commands::Eval {
                expressions,
                vars_file,
                vars,
                filter_type,
            } => {
                let filter = resolve_filter(filter_type.as_deref())?;
                let context = build_context(vars_file.as_deref(), vars)?;
                info!("evaluating {} selector(s) against {} variable(s)", expressions.len(), context.len());

                let cache = SelectorCache::new(filter, config.cache_capacity);
                let mut lines = Vec::with_capacity(expressions.len());
                for expression in expressions {
                    let matched = cache.evaluate(expression, &context)?;
                    if config.canonical_output {
                        let compiled = cache.get_or_compile(expression)?;
                        lines.push(format!("{compiled} => {matched}"));
                    } else {
                        lines.push(matched.to_string());
                    }
                }
                Ok(lines.join("\n"))
            }
            Commands::Check {
                expression,
                filter_type,
            } => {
                let compiled = resolve_filter(filter_type.as_deref())?.compile(expression)?;
                Ok(compiled.to_string())
            }
        }
    }
}

/// The filter for `--type`; only the SQL92 dialect exists, and it is the default.
fn resolve_filter(filter_type: Option<&str>) -> FlexResult<Arc<dyn Filter>> {
    if ExpressionType::is_sql92_type(filter_type) {
        Ok(Arc::new(SqlFilter::new()))
    } else {
        Err(FlexError::illegal_argument(format!(
            "unsupported filter type {:?}; expected {}",
            filter_type.unwrap_or_default(),
            ExpressionType::SQL92
        )))
    }
}

/// Reads the variables file, if any, then applies `NAME=VALUE` bindings over it.
pub fn build_context(vars_file: Option<&Path>, vars: &[String]) -> FlexResult<MessageEvaluationContext> {
    let mut context = match vars_file {
        Some(path) => {
            debug!("loading variables from {}", path.display());
            MessageEvaluationContext::from_json(&fs::read_to_string(path)?)?
        }
        None => MessageEvaluationContext::new(),
    };
    for raw in vars {
        let (name, value) = parse_var(raw)?;
        context.put(name, value);
    }
    Ok(context)
}

/// Parses `NAME=VALUE`. The value is a JSON scalar when it parses as one (`5`, `2.5`,
/// `true`, `"quoted"`), and the raw text otherwise.
pub fn parse_var(raw: &str) -> FlexResult<(String, Value)> {
    let Some((name, value)) = raw.split_once('=') else {
        return Err(FlexError::illegal_argument(format!(
            "variable binding {raw:?} must look like NAME=VALUE"
        )));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(FlexError::illegal_argument(format!(
            "variable binding {raw:?} has an empty name"
        )));
    }
    let value = serde_json::from_str::<Value>(value).unwrap_or_else(|_| Value::from(value));
    Ok((name.to_string(), value))
}

/// One-line description of a failure, led by the selector error kind when there is one.
pub fn describe_error(error: &FlexError) -> String {
    match error.selector_kind() {
        Some(kind) => format!("{kind}: {error}"),
        None => format!("error: {error}"),
    }
}
