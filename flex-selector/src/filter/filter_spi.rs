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

//! Filter Service Provider Interface (SPI)
//!
//! Each filter type compiles its own expression language into a [`BooleanExpression`]
//! and identifies itself through a type identifier, such as
//! [`ExpressionType::SQL92`](crate::constant::expression_type::ExpressionType::SQL92).

use std::fmt;

use flex_error::SelectorResult;

use crate::expression::boolean_expression::BooleanExpression;

/// Core trait for selector filter implementations.
///
/// Implementations must be `Send + Sync`; filters are wrapped in `Arc` and shared across
/// threads, so they should be stateless.
///
/// # Examples
///
/// ```rust,ignore
/// use flex_selector::filter::Filter;
/// use flex_selector::expression::boolean_expression::BooleanExpression;
///
/// #[derive(Debug)]
/// struct UpperCaseSqlFilter;
///
/// impl Filter for UpperCaseSqlFilter {
///     fn compile(&self, expr: &str) -> SelectorResult<Box<dyn BooleanExpression>> {
///         SqlFilter::new().compile(&expr.to_uppercase())
///     }
///
///     fn of_type(&self) -> &str {
///         "SQL92_UPPER"
///     }
/// }
/// ```
pub trait Filter: Send + Sync + fmt::Debug {
    /// Compiles an expression string into an executable expression.
    ///
    /// # Errors
    ///
    /// Returns the lex or syntax error that stopped compilation. Type and variable errors
    /// only surface once the expression is evaluated.
    fn compile(&self, expr: &str) -> SelectorResult<Box<dyn BooleanExpression>>;

    /// Returns the unique type identifier for this filter, e.g. `"SQL92"`.
    fn of_type(&self) -> &str;
}
