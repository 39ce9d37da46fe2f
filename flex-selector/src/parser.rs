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

//! Selector text to expression tree.

pub mod lexer;
pub mod selector_parser;
pub mod token;

use flex_error::SelectorResult;

use crate::expression::Expression;
use crate::parser::selector_parser::SelectorParser;

/// Parses a selector into an expression tree without evaluating it.
pub fn parse(source: &str) -> SelectorResult<Box<dyn Expression>> {
    SelectorParser::new(source).parse()
}
