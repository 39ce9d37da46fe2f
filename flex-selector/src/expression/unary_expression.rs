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

//! Expressions evaluated against a single subject operand: negation, `IN`, `LIKE` and
//! `IS NULL`, each with its `NOT` form where the grammar has one.

use std::fmt;

use cheetah_string::CheetahString;
use flex_error::SelectorError;
use flex_error::SelectorResult;

use crate::constant::unary_type::UnaryType;
use crate::expression::EvaluationContext;
use crate::expression::Expression;
use crate::expression::Value;
use crate::utils::like_matcher::LikeMatcher;
use crate::utils::like_matcher::DEFAULT_ESCAPE;

/// Arithmetic negation, `-operand`.
#[derive(Debug)]
pub struct UnaryExpression {
    operand: Box<dyn Expression>,
}

impl UnaryExpression {
    pub fn negate(operand: Box<dyn Expression>) -> Self {
        Self { operand }
    }

    pub fn unary_type(&self) -> UnaryType {
        UnaryType::Negate
    }
}

impl Expression for UnaryExpression {
    fn evaluate(&self, context: &dyn EvaluationContext) -> SelectorResult<Value> {
        match self.operand.evaluate(context)? {
            Value::Long(v) => Ok(v.checked_neg().map(Value::Long).unwrap_or(Value::Double(-(v as f64)))),
            Value::Double(v) => Ok(Value::Double(-v)),
            other => Err(SelectorError::incompatible_type(
                "-",
                format!("requires a numeric operand; got {}", other.type_name()),
            )),
        }
    }
}

impl fmt::Display for UnaryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(-{})", self.operand)
    }
}

/// `operand [NOT] IN (e1, e2, ...)`: membership by structural equality.
///
/// No type restriction applies; an element of another type simply does not match.
#[derive(Debug)]
pub struct InExpression {
    operand: Box<dyn Expression>,
    list: Vec<Box<dyn Expression>>,
    not: bool,
}

impl InExpression {
    pub fn new(operand: Box<dyn Expression>, list: Vec<Box<dyn Expression>>, not: bool) -> Self {
        Self { operand, list, not }
    }

    pub fn unary_type(&self) -> UnaryType {
        UnaryType::In
    }
}

impl Expression for InExpression {
    fn evaluate(&self, context: &dyn EvaluationContext) -> SelectorResult<Value> {
        let subject = self.operand.evaluate(context)?;
        let mut found = false;
        for element in &self.list {
            // every element is evaluated so unbound variables are always reported
            found |= element.evaluate(context)?.selector_eq(&subject);
        }
        Ok(Value::Boolean(found != self.not))
    }
}

impl fmt::Display for InExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {}IN (", self.operand, if self.not { "NOT " } else { "" })?;
        for (i, element) in self.list.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{element}")?;
        }
        f.write_str("))")
    }
}

/// `operand [NOT] LIKE pattern [ESCAPE 'c']`.
#[derive(Debug)]
pub struct LikeExpression {
    operand: Box<dyn Expression>,
    pattern: Box<dyn Expression>,
    escape: char,
    not: bool,
}

impl LikeExpression {
    pub fn new(operand: Box<dyn Expression>, pattern: Box<dyn Expression>, escape: char, not: bool) -> Self {
        Self {
            operand,
            pattern,
            escape,
            not,
        }
    }

    pub fn unary_type(&self) -> UnaryType {
        UnaryType::Like
    }

    pub fn escape(&self) -> char {
        self.escape
    }
}

impl Expression for LikeExpression {
    fn evaluate(&self, context: &dyn EvaluationContext) -> SelectorResult<Value> {
        let subject = self.operand.evaluate(context)?;
        let pattern = self.pattern.evaluate(context)?;
        let (Some(subject), Some(pattern)) = (subject.as_str(), pattern.as_str()) else {
            return Err(SelectorError::incompatible_type(
                "LIKE",
                format!(
                    "requires string operands; got {} and {}",
                    subject.type_name(),
                    pattern.type_name()
                ),
            ));
        };
        let matched = LikeMatcher::new(pattern, self.escape).matches(subject);
        Ok(Value::Boolean(matched != self.not))
    }
}

impl fmt::Display for LikeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({} {}LIKE {}",
            self.operand,
            if self.not { "NOT " } else { "" },
            self.pattern
        )?;
        if self.escape != DEFAULT_ESCAPE {
            let escape = Value::from(self.escape.to_string());
            write!(f, " ESCAPE {escape}")?;
        }
        f.write_str(")")
    }
}

/// `variable IS [NOT] NULL`: tests whether the variable is bound, never its value.
#[derive(Debug, Clone)]
pub struct NullExpression {
    name: CheetahString,
    not: bool,
}

impl NullExpression {
    pub fn new(name: impl Into<CheetahString>, not: bool) -> Self {
        Self { name: name.into(), not }
    }

    pub fn unary_type(&self) -> UnaryType {
        UnaryType::IsNull
    }
}

impl Expression for NullExpression {
    fn evaluate(&self, context: &dyn EvaluationContext) -> SelectorResult<Value> {
        let bound = context.contains(self.name.as_str());
        Ok(Value::Boolean(bound == self.not))
    }
}

impl fmt::Display for NullExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} IS {}NULL)", self.name, if self.not { "NOT " } else { "" })
    }
}
