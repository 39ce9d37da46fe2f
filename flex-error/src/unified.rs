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

//! Unified error type for Flex selector binaries and integrations.
//!
//! Library code in `flex-selector` returns [`SelectorError`] directly; anything that also
//! touches files, configuration or serialized environments converts into [`FlexError`].

use std::io;

use thiserror::Error;

pub use crate::selector_error::SelectorError;
pub use crate::selector_error::SelectorErrorKind;

/// Main error type for operations surrounding selector evaluation.
///
/// # Examples
///
/// ```rust
/// use flex_error::FlexError;
/// use flex_error::FlexResult;
/// use flex_error::SelectorError;
///
/// fn lookup(name: &str) -> FlexResult<()> {
///     Err(SelectorError::unknown_variable(name).into())
/// }
///
/// let err = lookup("priority").unwrap_err();
/// assert!(matches!(err, FlexError::Selector(_)));
/// ```
#[derive(Debug, Error)]
pub enum FlexError {
    // ============================================================================
    // Selector Errors
    // ============================================================================
    /// Lexing, parsing or evaluation of a selector failed
    #[error(transparent)]
    Selector(#[from] SelectorError),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Configuration parsing failed
    #[error("Configuration parse error for '{key}': {reason}")]
    ConfigParseFailed { key: &'static str, reason: String },

    /// Invalid configuration value
    #[error("Invalid configuration for '{key}': value='{value}', reason={reason}")]
    ConfigInvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    // ============================================================================
    // Serialization Errors
    // ============================================================================
    /// Decoding a variable environment failed
    #[error("Decoding failed ({format}): {message}")]
    DecodeFailed { format: &'static str, message: String },

    // ============================================================================
    // System Errors
    // ============================================================================
    /// IO error from std::io
    #[error("IO error: {0}")]
    IO(#[from] io::Error),

    /// Illegal argument
    #[error("Illegal argument: {0}")]
    IllegalArgument(String),
}

impl FlexError {
    #[inline]
    pub fn config_invalid_value(key: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigInvalidValue {
            key,
            value: value.into(),
            reason: reason.into(),
        }
    }

    #[inline]
    pub fn decode_failed(format: &'static str, message: impl Into<String>) -> Self {
        Self::DecodeFailed {
            format,
            message: message.into(),
        }
    }

    #[inline]
    pub fn illegal_argument(message: impl Into<String>) -> Self {
        Self::IllegalArgument(message.into())
    }

    /// Returns the selector error kind when this error came from the selector engine.
    pub fn selector_kind(&self) -> Option<SelectorErrorKind> {
        match self {
            FlexError::Selector(e) => Some(e.kind()),
            _ => None,
        }
    }
}

#[cfg(feature = "with_serde")]
impl From<serde_json::Error> for FlexError {
    #[inline]
    fn from(e: serde_json::Error) -> Self {
        Self::decode_failed("JSON", e.to_string())
    }
}

#[cfg(feature = "with_config")]
impl From<config::ConfigError> for FlexError {
    fn from(e: config::ConfigError) -> Self {
        Self::ConfigParseFailed {
            key: "unknown",
            reason: e.to_string(),
        }
    }
}

/// Result type alias for operations that may fail with a [`FlexError`].
pub type FlexResult<T> = std::result::Result<T, FlexError>;
