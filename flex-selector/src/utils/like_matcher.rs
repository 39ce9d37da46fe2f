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

//! Wildcard matching for `LIKE`.
//!
//! `_` matches exactly one character and `%` any run of characters, including none. The
//! escape character makes a following `_` or `%` literal; before any other character, or at
//! the end of the pattern, the escape character is itself literal. Matching is anchored at
//! both ends.

/// Default escape character used when a `LIKE` has no `ESCAPE` clause.
pub const DEFAULT_ESCAPE: char = '\\';

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternToken {
    Literal(Vec<char>),
    AnyChar,
    AnyRange,
}

/// A tokenized `LIKE` pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeMatcher {
    tokens: Vec<PatternToken>,
}

impl LikeMatcher {
    pub fn new(pattern: &str, escape: char) -> Self {
        let mut tokens = Vec::new();
        let mut literal = Vec::new();
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            if c == escape {
                match chars.peek() {
                    Some(&next) if next == '_' || next == '%' => {
                        literal.push(next);
                        chars.next();
                    }
                    _ => literal.push(c),
                }
                continue;
            }
            let wildcard = match c {
                '_' => PatternToken::AnyChar,
                '%' => PatternToken::AnyRange,
                _ => {
                    literal.push(c);
                    continue;
                }
            };
            if !literal.is_empty() {
                tokens.push(PatternToken::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(wildcard);
        }
        if !literal.is_empty() {
            tokens.push(PatternToken::Literal(literal));
        }
        Self { tokens }
    }

    /// Returns `true` if the whole of `source` matches the pattern.
    ///
    /// After a `%` the source is scanned forward for the first occurrence of the next literal
    /// segment; earlier matches are never revisited.
    pub fn matches(&self, source: &str) -> bool {
        let source: Vec<char> = source.chars().collect();
        let mut pos = 0;
        let mut index = 0;

        while index < self.tokens.len() {
            match &self.tokens[index] {
                PatternToken::AnyChar => {
                    if pos >= source.len() {
                        return false;
                    }
                    pos += 1;
                    index += 1;
                }
                PatternToken::Literal(literal) => {
                    if !source[pos..].starts_with(literal) {
                        return false;
                    }
                    pos += literal.len();
                    index += 1;
                }
                PatternToken::AnyRange => {
                    index += 1;
                    // `%%` collapses and `%_` behaves like `_%`
                    let mut required = 0;
                    while let Some(token @ (PatternToken::AnyChar | PatternToken::AnyRange)) = self.tokens.get(index) {
                        if *token == PatternToken::AnyChar {
                            required += 1;
                        }
                        index += 1;
                    }
                    pos += required;
                    if pos > source.len() {
                        return false;
                    }
                    let Some(PatternToken::Literal(literal)) = self.tokens.get(index) else {
                        return true;
                    };
                    match source[pos..]
                        .windows(literal.len())
                        .position(|window| window == literal.as_slice())
                    {
                        Some(offset) => pos += offset,
                        None => return false,
                    }
                }
            }
        }
        pos == source.len()
    }
}

/// Matches `source` against a `LIKE` pattern in one call.
pub fn like(source: &str, pattern: &str, escape: char) -> bool {
    LikeMatcher::new(pattern, escape).matches(source)
}
