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

//! One-call entry points: compile and evaluate a selector in a single step.

use flex_error::SelectorResult;
use tracing::debug;

use crate::expression::boolean_expression::BooleanExpression;
use crate::expression::EvaluationContext;
use crate::expression::Value;
use crate::filter::Filter;
use crate::filter::SqlFilter;
use crate::parser;

/// Compiles a SQL92 selector for repeated evaluation.
pub fn compile(expression: &str) -> SelectorResult<Box<dyn BooleanExpression>> {
    SqlFilter::new().compile(expression)
}

/// Evaluates `expression` against `context` and returns whether it selects.
///
/// Fails if the selector does not lex or parse, refers to a variable the context does
/// not bind, applies an operator to values of the wrong type, divides by zero, or
/// produces something other than a boolean.
///
/// ```rust
/// use flex_selector::expression::evaluation_context::MessageEvaluationContext;
///
/// let mut context = MessageEvaluationContext::new();
/// context.put("price", 120);
/// context.put("category", "books");
///
/// let selected = flex_selector::evaluate("price between 100 and 200 and category = 'books'", &context);
/// assert_eq!(selected, Ok(true));
/// ```
pub fn evaluate(expression: &str, context: &dyn EvaluationContext) -> SelectorResult<bool> {
    let matched = compile(expression)?.matches(context)?;
    debug!("selector {:?} evaluated to {}", expression, matched);
    Ok(matched)
}

/// Evaluates `expression` without requiring a boolean result.
pub fn evaluate_value(expression: &str, context: &dyn EvaluationContext) -> SelectorResult<Value> {
    parser::parse(expression)?.evaluate(context)
}

#[cfg(test)]
mod tests {
    use flex_error::SelectorError;

    use super::*;
    use crate::expression::empty_evaluation_context::EmptyEvaluationContext;
    use crate::expression::evaluation_context::MessageEvaluationContext;

    #[test]
    fn evaluate_requires_boolean() {
        assert_eq!(evaluate("2 > 1", &EmptyEvaluationContext), Ok(true));
        assert_eq!(
            evaluate("1 + 1", &EmptyEvaluationContext),
            Err(SelectorError::incompatible_type(
                "selector",
                "must evaluate to a boolean; got number"
            ))
        );
    }

    #[test]
    fn evaluate_value_returns_any_type() {
        let mut context = MessageEvaluationContext::new();
        context.put("qty", 3);
        assert_eq!(evaluate_value("qty * 2 + 1", &context), Ok(Value::Long(7)));
        assert_eq!(evaluate_value("7 / 2", &context), Ok(Value::Double(3.5)));
        assert_eq!(evaluate_value("'abc'", &context), Ok(Value::from("abc")));
    }

    #[test]
    fn compile_keeps_source() {
        let compiled = compile("a is null").unwrap();
        assert!(compiled.matches(&EmptyEvaluationContext).unwrap());
        assert_eq!(compiled.to_string(), "(a IS NULL)");
    }
}
