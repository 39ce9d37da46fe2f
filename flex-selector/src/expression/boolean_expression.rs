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

use std::fmt;

use cheetah_string::CheetahString;
use flex_error::SelectorError;
use flex_error::SelectorResult;

use crate::expression::evaluation_context::EvaluationContext;
use crate::expression::Expression;
use crate::expression::Value;

/// An expression whose result decides whether a message is selected.
///
/// `matches` evaluates the expression and insists on a boolean result. Evaluation errors
/// are propagated unchanged; a non-boolean result is reported as an incompatible type.
///
/// # Example
///
/// ```rust,ignore
/// use flex_selector::expression::boolean_expression::BooleanExpression;
/// use flex_selector::expression::evaluation_context::MessageEvaluationContext;
///
/// let selector = flex_selector::compile("region = 'us-west'")?;
/// let mut context = MessageEvaluationContext::new();
/// context.put("region", "us-west");
///
/// assert!(selector.matches(&context)?);
/// ```
pub trait BooleanExpression: Expression {
    fn matches(&self, context: &dyn EvaluationContext) -> SelectorResult<bool> {
        match self.evaluate(context)? {
            Value::Boolean(b) => Ok(b),
            other => Err(SelectorError::incompatible_type(
                "selector",
                format!("must evaluate to a boolean; got {}", other.type_name()),
            )),
        }
    }
}

/// A compiled selector: the parsed tree plus the text it was parsed from.
#[derive(Debug)]
pub struct SelectorExpression {
    source: CheetahString,
    root: Box<dyn Expression>,
}

impl SelectorExpression {
    pub fn new(source: impl Into<CheetahString>, root: Box<dyn Expression>) -> Self {
        Self {
            source: source.into(),
            root,
        }
    }

    /// The selector text as given to the compiler.
    pub fn source(&self) -> &str {
        self.source.as_str()
    }

    pub fn root(&self) -> &dyn Expression {
        self.root.as_ref()
    }
}

impl Expression for SelectorExpression {
    #[inline]
    fn evaluate(&self, context: &dyn EvaluationContext) -> SelectorResult<Value> {
        self.root.evaluate(context)
    }
}

impl BooleanExpression for SelectorExpression {}

impl fmt::Display for SelectorExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}
