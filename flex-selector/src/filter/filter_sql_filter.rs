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

//! SQL92 selector filter.
//!
//! Supported syntax:
//! - Comparison operators: `=`, `<>`, `>`, `>=`, `<`, `<=`
//! - Logical operators: `AND`, `OR`
//! - Arithmetic: `+`, `-`, `*`, `/` and unary `-`
//! - `[NOT] BETWEEN`, `[NOT] IN (...)`, `[NOT] LIKE ... [ESCAPE 'c']`, `IS [NOT] NULL`
//! - Literals: integers (decimal or `0x` hex), floats, `'strings'`, `true`, `false`
//! - Variables: any identifier that is not a reserved word

use tracing::debug;

use flex_error::SelectorResult;

use crate::constant::expression_type::ExpressionType;
use crate::expression::boolean_expression::BooleanExpression;
use crate::expression::boolean_expression::SelectorExpression;
use crate::filter::filter_spi::Filter;
use crate::parser;

/// SQL92 selector filter, registered as `"SQL92"`.
///
/// `SqlFilter` is stateless and can be safely shared across threads when wrapped in `Arc`.
/// Compile once and reuse the expression for many evaluations, or let a
/// [`SelectorCache`](crate::filter::SelectorCache) do it.
#[derive(Debug, Clone, Default)]
pub struct SqlFilter;

impl SqlFilter {
    pub fn new() -> Self {
        Self
    }
}

impl Filter for SqlFilter {
    fn compile(&self, expr: &str) -> SelectorResult<Box<dyn BooleanExpression>> {
        let root = parser::parse(expr).inspect_err(|e| debug!("failed to compile selector {:?}: {}", expr, e))?;
        debug!("compiled selector {:?} as {}", expr, root);
        Ok(Box::new(SelectorExpression::new(expr, root)))
    }

    fn of_type(&self) -> &str {
        ExpressionType::SQL92
    }
}

#[cfg(test)]
mod tests {
    use flex_error::SelectorError;
    use flex_error::SelectorErrorKind;

    use super::*;
    use crate::expression::evaluation_context::MessageEvaluationContext;

    #[test]
    fn test_sql_filter_of_type() {
        let filter = SqlFilter::new();
        assert_eq!(filter.of_type(), "SQL92");
    }

    #[test]
    fn test_sql_filter_default() {
        let filter = SqlFilter;
        assert_eq!(filter.of_type(), "SQL92");
    }

    #[test]
    fn test_compile_and_match() {
        let expr = SqlFilter::new().compile("price > 100 AND category = 'electronics'").unwrap();

        let mut context = MessageEvaluationContext::new();
        context.put("price", 150);
        context.put("category", "electronics");
        assert!(expr.matches(&context).unwrap());

        context.put("price", 50);
        assert!(!expr.matches(&context).unwrap());
    }

    #[test]
    fn test_compile_reports_syntax_errors() {
        let err = SqlFilter::new().compile("price >").unwrap_err();
        assert_eq!(err.kind(), SelectorErrorKind::Syntax);

        let err = SqlFilter::new().compile("price # 1").unwrap_err();
        assert_eq!(err, SelectorError::lex('#', 6));
    }

    #[test]
    fn test_compile_defers_variable_lookup() {
        let expr = SqlFilter::new().compile("missing = 1").unwrap();
        assert_eq!(
            expr.matches(&MessageEvaluationContext::new()).unwrap_err(),
            SelectorError::unknown_variable("missing")
        );
    }
}
