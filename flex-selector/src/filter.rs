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

//! Selector filters
//!
//! A [`Filter`] turns selector text into a reusable [`BooleanExpression`]; [`SqlFilter`] is
//! the SQL92 implementation. [`SelectorCache`] remembers compiled selectors so hot selectors
//! are parsed once.
//!
//! # Usage
//!
//! ```rust
//! use flex_selector::expression::boolean_expression::BooleanExpression;
//! use flex_selector::expression::evaluation_context::MessageEvaluationContext;
//! use flex_selector::filter::Filter;
//! use flex_selector::filter::SqlFilter;
//!
//! let selector = SqlFilter::new().compile("age > 18 AND region = 'US'").unwrap();
//!
//! let mut context = MessageEvaluationContext::new();
//! context.put("age", 30);
//! context.put("region", "US");
//! assert_eq!(selector.matches(&context), Ok(true));
//! ```
//!
//! Filters hold no state of their own; every evaluation takes its variables from the
//! context passed in, so a filter or compiled selector can be shared freely across threads.
//!
//! [`BooleanExpression`]: crate::expression::boolean_expression::BooleanExpression

mod filter_spi;
mod filter_sql_filter;
mod selector_cache;

pub use filter_spi::Filter;
pub use filter_sql_filter::SqlFilter;
pub use selector_cache::SelectorCache;
pub use selector_cache::DEFAULT_CACHE_CAPACITY;
