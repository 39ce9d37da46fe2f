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

//! Binary Expressions for Message Selectors
//!
//! A binary expression combines two sub-expressions with an operator:
//! - Logical operations: `AND`, `OR`
//! - Comparison operations: `=`, `<>`, `<`, `>`, `<=`, `>=`
//! - Arithmetic operations: `+`, `-`, `*`, `/`
//!
//! # Operand types
//!
//! Both operands are always evaluated, left first, before the operator checks their types:
//!
//! | operator              | operands          | result  |
//! |-----------------------|-------------------|---------|
//! | `=` `<>`              | any               | boolean |
//! | `AND` `OR`            | boolean           | boolean |
//! | `<` `<=` `>` `>=`     | number            | boolean |
//! | `+` `-` `*` `/`       | number            | number  |
//!
//! Integer arithmetic stays integral unless it overflows or, for `/`, the quotient is not a
//! whole number; in both cases the result is a floating-point number. Division by zero fails.
//!
//! # Examples
//!
//! ```rust,ignore
//! use flex_selector::constant::binary_type::BinaryType;
//! use flex_selector::expression::binary_expression::BinaryExpression;
//! use flex_selector::expression::leaf_expression::{ConstantExpression, VariableExpression};
//!
//! let expr = BinaryExpression::new(
//!     BinaryType::GreaterThan,
//!     Box::new(VariableExpression::new("priority")),
//!     Box::new(ConstantExpression::new(3)),
//! );
//! assert_eq!(expr.to_string(), "(priority > 3)");
//! ```

use std::cmp::Ordering;
use std::fmt;

use flex_error::SelectorError;
use flex_error::SelectorResult;

use crate::constant::binary_type::BinaryType;
use crate::expression::EvaluationContext;
use crate::expression::Expression;
use crate::expression::Value;

#[derive(Debug)]
pub struct BinaryExpression {
    binary_type: BinaryType,
    left: Box<dyn Expression>,
    right: Box<dyn Expression>,
}

impl BinaryExpression {
    pub fn new(binary_type: BinaryType, left: Box<dyn Expression>, right: Box<dyn Expression>) -> Self {
        Self {
            binary_type,
            left,
            right,
        }
    }

    pub fn binary_type(&self) -> BinaryType {
        self.binary_type
    }

    /// Returns a reference to the left operand expression.
    pub fn left(&self) -> &dyn Expression {
        self.left.as_ref()
    }

    /// Returns a reference to the right operand expression.
    pub fn right(&self) -> &dyn Expression {
        self.right.as_ref()
    }

    /// Returns the operator symbol, e.g. `"AND"` or `"<>"`.
    pub fn expression_symbol(&self) -> &'static str {
        self.binary_type.symbol()
    }

    fn incompatible(&self, expected: &str, left: &Value, right: &Value) -> SelectorError {
        SelectorError::incompatible_type(
            self.expression_symbol(),
            format!(
                "requires {expected} operands; got {} and {}",
                left.type_name(),
                right.type_name()
            ),
        )
    }
}

impl Expression for BinaryExpression {
    fn evaluate(&self, context: &dyn EvaluationContext) -> SelectorResult<Value> {
        let left = self.left.evaluate(context)?;
        let right = self.right.evaluate(context)?;

        match self.binary_type {
            BinaryType::Equal => Ok(Value::Boolean(left.selector_eq(&right))),
            BinaryType::NotEqual => Ok(Value::Boolean(!left.selector_eq(&right))),
            BinaryType::And | BinaryType::Or => match (left.as_bool(), right.as_bool()) {
                (Some(l), Some(r)) => Ok(Value::Boolean(if self.binary_type == BinaryType::And {
                    l && r
                } else {
                    l || r
                })),
                _ => Err(self.incompatible("boolean", &left, &right)),
            },
            BinaryType::GreaterThan
            | BinaryType::GreaterThanOrEqual
            | BinaryType::LessThan
            | BinaryType::LessThanOrEqual => {
                if !left.is_number() || !right.is_number() {
                    return Err(self.incompatible("numeric", &left, &right));
                }
                // NaN compares false against everything
                let result = left.numeric_cmp(&right).is_some_and(|ordering| match self.binary_type {
                    BinaryType::GreaterThan => ordering == Ordering::Greater,
                    BinaryType::GreaterThanOrEqual => ordering != Ordering::Less,
                    BinaryType::LessThan => ordering == Ordering::Less,
                    _ => ordering != Ordering::Greater,
                });
                Ok(Value::Boolean(result))
            }
            BinaryType::Add | BinaryType::Subtract | BinaryType::Multiply | BinaryType::Divide => {
                if !left.is_number() || !right.is_number() {
                    return Err(self.incompatible("numeric", &left, &right));
                }
                arithmetic(self.binary_type, &left, &right)
            }
        }
    }
}

impl fmt::Display for BinaryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.expression_symbol(), self.right)
    }
}

/// Applies `+`, `-`, `*` or `/` (any other operator is treated as `/`) to two numbers.
pub(crate) fn arithmetic(binary_type: BinaryType, left: &Value, right: &Value) -> SelectorResult<Value> {
    if let (Value::Long(l), Value::Long(r)) = (left, right) {
        let (l, r) = (*l, *r);
        let exact = match binary_type {
            BinaryType::Add => l.checked_add(r),
            BinaryType::Subtract => l.checked_sub(r),
            BinaryType::Multiply => l.checked_mul(r),
            _ => {
                if r == 0 {
                    return Err(SelectorError::division_by_zero());
                }
                match l.checked_rem(r) {
                    Some(0) => l.checked_div(r),
                    _ => None,
                }
            }
        };
        if let Some(value) = exact {
            return Ok(Value::Long(value));
        }
    }

    let (Some(l), Some(r)) = (left.as_f64(), right.as_f64()) else {
        return Err(SelectorError::incompatible_type(
            binary_type.symbol(),
            format!(
                "requires numeric operands; got {} and {}",
                left.type_name(),
                right.type_name()
            ),
        ));
    };
    let value = match binary_type {
        BinaryType::Add => l + r,
        BinaryType::Subtract => l - r,
        BinaryType::Multiply => l * r,
        _ => {
            if r == 0.0 {
                return Err(SelectorError::division_by_zero());
            }
            l / r
        }
    };
    Ok(Value::Double(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::evaluation_context::MessageEvaluationContext;
    use crate::expression::leaf_expression::ConstantExpression;
    use crate::expression::leaf_expression::VariableExpression;

    fn constant(value: impl Into<Value>) -> Box<dyn Expression> {
        Box::new(ConstantExpression::new(value))
    }

    fn eval(binary_type: BinaryType, left: impl Into<Value>, right: impl Into<Value>) -> SelectorResult<Value> {
        BinaryExpression::new(binary_type, constant(left), constant(right)).evaluate(&MessageEvaluationContext::new())
    }

    #[test]
    fn integer_arithmetic_stays_integral() {
        assert!(matches!(eval(BinaryType::Add, 1, 2), Ok(Value::Long(3))));
        assert!(matches!(eval(BinaryType::Subtract, 3, 5), Ok(Value::Long(-2))));
        assert!(matches!(eval(BinaryType::Multiply, 3, 2), Ok(Value::Long(6))));
        assert!(matches!(eval(BinaryType::Divide, 6, 3), Ok(Value::Long(2))));
    }

    #[test]
    fn inexact_division_produces_float() {
        assert!(matches!(eval(BinaryType::Divide, 7, 2), Ok(Value::Double(v)) if v == 3.5));
        assert!(matches!(eval(BinaryType::Divide, 1.0, 4), Ok(Value::Double(v)) if v == 0.25));
    }

    #[test]
    fn overflow_promotes_to_float() {
        let result = eval(BinaryType::Add, i64::MAX, 1).unwrap();
        assert!(matches!(result, Value::Double(_)));
        assert_eq!(result.as_f64(), Some(i64::MAX as f64 + 1.0));

        assert!(matches!(eval(BinaryType::Divide, i64::MIN, -1), Ok(Value::Double(_))));
    }

    #[test]
    fn division_by_zero_fails() {
        assert_eq!(eval(BinaryType::Divide, 1, 0).unwrap_err(), SelectorError::DivisionByZero);
        assert_eq!(eval(BinaryType::Divide, 1.5, 0.0).unwrap_err(), SelectorError::DivisionByZero);
        assert_eq!(eval(BinaryType::Divide, 0, 0.0).unwrap_err(), SelectorError::DivisionByZero);
    }

    #[test]
    fn arithmetic_requires_numbers() {
        let err = eval(BinaryType::Add, 1, "2").unwrap_err();
        assert_eq!(
            err,
            SelectorError::incompatible_type("+", "requires numeric operands; got number and string")
        );
    }

    #[test]
    fn equality_is_structural() {
        assert!(matches!(eval(BinaryType::Equal, 2, 2.0), Ok(Value::Boolean(true))));
        assert!(matches!(eval(BinaryType::Equal, "a", "a"), Ok(Value::Boolean(true))));
        assert!(matches!(eval(BinaryType::Equal, "1", 1), Ok(Value::Boolean(false))));
        assert!(matches!(eval(BinaryType::NotEqual, true, false), Ok(Value::Boolean(true))));
        assert!(matches!(eval(BinaryType::NotEqual, "x", 1), Ok(Value::Boolean(true))));
    }

    #[test]
    fn comparisons() {
        assert!(matches!(eval(BinaryType::GreaterThan, 2, 3), Ok(Value::Boolean(false))));
        assert!(matches!(eval(BinaryType::GreaterThan, 2, 1), Ok(Value::Boolean(true))));
        assert!(matches!(eval(BinaryType::GreaterThanOrEqual, 2, 2.0), Ok(Value::Boolean(true))));
        assert!(matches!(eval(BinaryType::LessThan, 1.5, 2), Ok(Value::Boolean(true))));
        assert!(matches!(eval(BinaryType::LessThanOrEqual, 3, 2), Ok(Value::Boolean(false))));
        assert!(matches!(eval(BinaryType::LessThan, f64::NAN, 2), Ok(Value::Boolean(false))));
    }

    #[test]
    fn comparisons_require_numbers() {
        let err = eval(BinaryType::GreaterThan, "text", 0).unwrap_err();
        assert_eq!(
            err,
            SelectorError::incompatible_type(">", "requires numeric operands; got string and number")
        );
    }

    #[test]
    fn logical_operators() {
        assert!(matches!(eval(BinaryType::And, true, true), Ok(Value::Boolean(true))));
        assert!(matches!(eval(BinaryType::And, true, false), Ok(Value::Boolean(false))));
        assert!(matches!(eval(BinaryType::Or, false, true), Ok(Value::Boolean(true))));
        assert!(matches!(eval(BinaryType::Or, false, false), Ok(Value::Boolean(false))));

        let err = eval(BinaryType::And, 1, 0).unwrap_err();
        assert_eq!(
            err,
            SelectorError::incompatible_type("AND", "requires boolean operands; got number and number")
        );
    }

    #[test]
    fn both_operands_are_evaluated() {
        let expr = BinaryExpression::new(
            BinaryType::And,
            constant(false),
            Box::new(VariableExpression::new("missing")),
        );
        let err = expr.evaluate(&MessageEvaluationContext::new()).unwrap_err();
        assert_eq!(err, SelectorError::unknown_variable("missing"));
    }

    #[test]
    fn display_is_parenthesized() {
        let expr = BinaryExpression::new(
            BinaryType::Add,
            Box::new(VariableExpression::new("a")),
            Box::new(BinaryExpression::new(BinaryType::Multiply, constant(2), constant(3))),
        );
        assert_eq!(expr.to_string(), "(a + (2 * 3))");
        assert_eq!(expr.expression_symbol(), "+");
        assert_eq!(expr.left().to_string(), "a");
        assert_eq!(expr.right().to_string(), "(2 * 3)");
    }
}
