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

/// Reserved words, matched case-insensitively.
pub const RESERVED_WORDS: [&str; 9] = ["AND", "BETWEEN", "IN", "IS", "LIKE", "NOT", "NULL", "OR", "ESCAPE"];

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // literals
    Long(i64),
    Double(f64),
    String(CheetahString),
    Boolean(bool),
    Variable(CheetahString),
    // operators and punctuation
    Plus,
    Minus,
    Times,
    Divide,
    Gt,
    Gte,
    Lt,
    Lte,
    Eq,
    Neq,
    LeftParen,
    RightParen,
    Comma,
    // reserved words
    And,
    Between,
    In,
    Is,
    Like,
    Not,
    Null,
    Or,
    Escape,
}

impl Token {
    /// Maps an identifier to its reserved word token, ignoring case.
    pub fn reserved(word: &str) -> Option<Token> {
        let token = match word.to_ascii_uppercase().as_str() {
            "AND" => Token::And,
            "BETWEEN" => Token::Between,
            "IN" => Token::In,
            "IS" => Token::Is,
            "LIKE" => Token::Like,
            "NOT" => Token::Not,
            "NULL" => Token::Null,
            "OR" => Token::Or,
            "ESCAPE" => Token::Escape,
            _ => return None,
        };
        Some(token)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Long(v) => write!(f, "number {v}"),
            Token::Double(v) => write!(f, "number {v:?}"),
            Token::String(s) => write!(f, "string '{s}'"),
            Token::Boolean(b) => write!(f, "boolean {b}"),
            Token::Variable(name) => write!(f, "variable '{name}'"),
            Token::Plus => f.write_str("'+'"),
            Token::Minus => f.write_str("'-'"),
            Token::Times => f.write_str("'*'"),
            Token::Divide => f.write_str("'/'"),
            Token::Gt => f.write_str("'>'"),
            Token::Gte => f.write_str("'>='"),
            Token::Lt => f.write_str("'<'"),
            Token::Lte => f.write_str("'<='"),
            Token::Eq => f.write_str("'='"),
            Token::Neq => f.write_str("'<>'"),
            Token::LeftParen => f.write_str("'('"),
            Token::RightParen => f.write_str("')'"),
            Token::Comma => f.write_str("','"),
            Token::And => f.write_str("AND"),
            Token::Between => f.write_str("BETWEEN"),
            Token::In => f.write_str("IN"),
            Token::Is => f.write_str("IS"),
            Token::Like => f.write_str("LIKE"),
            Token::Not => f.write_str("NOT"),
            Token::Null => f.write_str("NULL"),
            Token::Or => f.write_str("OR"),
            Token::Escape => f.write_str("ESCAPE"),
        }
    }
}

/// A token together with the byte offset it starts at.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub position: usize,
}

impl SpannedToken {
    pub fn new(token: Token, position: usize) -> Self {
        Self { token, position }
    }
}
