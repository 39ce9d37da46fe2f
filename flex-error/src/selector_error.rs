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

//! Errors raised while lexing, parsing or evaluating a message selector.

use std::fmt;

/// Coarse classification of a [`SelectorError`].
///
/// Messaging layers usually only care about the kind (e.g. to decide whether a
/// subscription should be rejected outright or the message silently skipped).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorErrorKind {
    Lex,
    Syntax,
    IncompatibleType,
    UnknownVariable,
    Arithmetic,
}

impl fmt::Display for SelectorErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectorErrorKind::Lex => "LexError",
            SelectorErrorKind::Syntax => "SyntaxError",
            SelectorErrorKind::IncompatibleType => "IncompatibleTypeError",
            SelectorErrorKind::UnknownVariable => "UnknownVariableError",
            SelectorErrorKind::Arithmetic => "ArithmeticError",
        };
        f.pad(name)
    }
}

/// Error types for selector operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("Illegal character '{character}' at position {position}")]
    Lex { character: char, position: usize },

    #[error("Numeric literal '{literal}' is out of range")]
    NumberOutOfRange { literal: String },

    #[error("Syntax error at position {position}: {message}")]
    Syntax { message: String, position: usize },

    #[error("{operator} {message}")]
    IncompatibleType { operator: &'static str, message: String },

    #[error("Undefined variable: {name}")]
    UnknownVariable { name: String },

    #[error("Division by zero")]
    DivisionByZero,
}

impl SelectorError {
    pub fn lex(character: char, position: usize) -> Self {
        SelectorError::Lex { character, position }
    }

    pub fn number_out_of_range(literal: impl Into<String>) -> Self {
        SelectorError::NumberOutOfRange {
            literal: literal.into(),
        }
    }

    pub fn syntax(message: impl Into<String>, position: usize) -> Self {
        SelectorError::Syntax {
            message: message.into(),
            position,
        }
    }

    pub fn incompatible_type(operator: &'static str, message: impl Into<String>) -> Self {
        SelectorError::IncompatibleType {
            operator,
            message: message.into(),
        }
    }

    pub fn unknown_variable(name: impl Into<String>) -> Self {
        SelectorError::UnknownVariable { name: name.into() }
    }

    pub fn division_by_zero() -> Self {
        SelectorError::DivisionByZero
    }

    /// Returns the error kind this error belongs to.
    pub fn kind(&self) -> SelectorErrorKind {
        match self {
            SelectorError::Lex { .. } | SelectorError::NumberOutOfRange { .. } => SelectorErrorKind::Lex,
            SelectorError::Syntax { .. } => SelectorErrorKind::Syntax,
            SelectorError::IncompatibleType { .. } => SelectorErrorKind::IncompatibleType,
            SelectorError::UnknownVariable { .. } => SelectorErrorKind::UnknownVariable,
            SelectorError::DivisionByZero => SelectorErrorKind::Arithmetic,
        }
    }
}

pub type SelectorResult<T> = std::result::Result<T, SelectorError>;
