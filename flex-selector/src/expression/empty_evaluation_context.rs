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

use std::collections::HashMap;

use cheetah_string::CheetahString;

use crate::expression::evaluation_context::EvaluationContext;
use crate::expression::value::Value;

/// A context with no variables bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyEvaluationContext;

impl EvaluationContext for EmptyEvaluationContext {
    fn get(&self, _name: &str) -> Option<&Value> {
        None
    }

    fn key_values(&self) -> Option<HashMap<CheetahString, Value>> {
        None
    }
}
