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

use crate::expression::EvaluationContext;
use crate::expression::Expression;
use crate::expression::Value;

/// A literal number, string or boolean.
#[derive(Debug, Clone)]
pub struct ConstantExpression {
    value: Value,
}

impl ConstantExpression {
    pub fn new(value: impl Into<Value>) -> Self {
        Self { value: value.into() }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Expression for ConstantExpression {
    fn evaluate(&self, _context: &dyn EvaluationContext) -> SelectorResult<Value> {
        Ok(self.value.clone())
    }
}

impl fmt::Display for ConstantExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

/// A reference to a variable of the evaluation context.
#[derive(Debug, Clone)]
pub struct VariableExpression {
    name: CheetahString,
}

impl VariableExpression {
    pub fn new(name: impl Into<CheetahString>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

impl Expression for VariableExpression {
    fn evaluate(&self, context: &dyn EvaluationContext) -> SelectorResult<Value> {
        context
            .get(self.name.as_str())
            .cloned()
            .ok_or_else(|| SelectorError::unknown_variable(self.name.as_str()))
    }
}

impl fmt::Display for VariableExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_str())
    }
}
