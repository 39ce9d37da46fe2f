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

//! Selector expression tree.
//!
//! The parser produces a tree of [`Expression`] nodes; evaluating the root against an
//! [`EvaluationContext`] yields a [`Value`]. Nodes hold no state between evaluations, so a
//! compiled tree can be evaluated repeatedly and from several threads at once.

pub mod between_expression;
pub mod binary_expression;
pub mod boolean_expression;
pub mod empty_evaluation_context;
pub mod evaluation_context;
pub mod leaf_expression;
pub mod unary_expression;
pub mod value;

use std::fmt;

use flex_error::SelectorResult;

pub use crate::expression::evaluation_context::EvaluationContext;
pub use crate::expression::value::Value;

pub trait Expression: Send + Sync + fmt::Debug + fmt::Display {
    /// Calculate expression result with context
    ///
    /// # Arguments
    ///
    /// * `context` - Variable environment of this evaluation
    ///
    /// # Returns
    ///
    /// The value of this expression, or the first error met while evaluating it.
    fn evaluate(&self, context: &dyn EvaluationContext) -> SelectorResult<Value>;
}
