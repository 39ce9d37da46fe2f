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

use std::cmp::Ordering;
use std::fmt;

use flex_error::SelectorError;
use flex_error::SelectorResult;

use crate::expression::EvaluationContext;
use crate::expression::Expression;
use crate::expression::Value;

/// `operand [NOT] BETWEEN low AND high`, inclusive on both ends.
///
/// All three operands must be numbers. `NOT BETWEEN` holds when the operand lies strictly
/// outside the range.
#[derive(Debug)]
pub struct BetweenExpression {
    operand: Box<dyn Expression>,
    low: Box<dyn Expression>,
    high: Box<dyn Expression>,
    not: bool,
}

impl BetweenExpression {
    pub fn new(operand: Box<dyn Expression>, low: Box<dyn Expression>, high: Box<dyn Expression>, not: bool) -> Self {
        Self {
            operand,
            low,
            high,
            not,
        }
    }

    pub fn is_not(&self) -> bool {
        self.not
    }
}

impl Expression for BetweenExpression {
    fn evaluate(&self, context: &dyn EvaluationContext) -> SelectorResult<Value> {
        let value = self.operand.evaluate(context)?;
        let low = self.low.evaluate(context)?;
        let high = self.high.evaluate(context)?;

        if !(value.is_number() && low.is_number() && high.is_number()) {
            return Err(SelectorError::incompatible_type(
                "BETWEEN",
                format!(
                    "only works with numbers; got {}, {} and {}",
                    value.type_name(),
                    low.type_name(),
                    high.type_name()
                ),
            ));
        }

        let above_low = value.numeric_cmp(&low);
        let below_high = value.numeric_cmp(&high);
        // a NaN operand is neither inside nor outside the range
        let within = matches!(above_low, Some(Ordering::Greater | Ordering::Equal))
            && matches!(below_high, Some(Ordering::Less | Ordering::Equal));
        let outside = matches!(above_low, Some(Ordering::Less)) || matches!(below_high, Some(Ordering::Greater));
        Ok(Value::Boolean(if self.not { outside } else { within }))
    }
}

impl fmt::Display for BetweenExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({} {}BETWEEN {} AND {})",
            self.operand,
            if self.not { "NOT " } else { "" },
            self.low,
            self.high
        )
    }
}
