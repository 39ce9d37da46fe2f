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

//! SQL92 message selectors.
//!
//! A selector is a boolean expression over the variables bound to a message, such as
//! `priority > 3 AND (region IN ('eu', 'us'))`. This crate lexes and parses selectors into an
//! expression tree and evaluates that tree against an [`EvaluationContext`].
//!
//! Evaluation never touches shared state: every call takes the variables from the context
//! it is given, so compiled selectors can be cached and evaluated from many threads.
//!
//! ```rust
//! use flex_selector::expression::evaluation_context::MessageEvaluationContext;
//!
//! let mut context = MessageEvaluationContext::new();
//! context.put("name", "my test string");
//!
//! assert_eq!(flex_selector::evaluate("name like '%est%'", &context), Ok(true));
//! ```

pub mod constant;
pub mod expression;
pub mod filter;
pub mod parser;
mod selector;
pub mod utils;

pub use crate::expression::EvaluationContext;
pub use crate::expression::Expression;
pub use crate::expression::Value;
pub use crate::selector::compile;
pub use crate::selector::evaluate;
pub use crate::selector::evaluate_value;
