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

//! # Flex Selector Error Handling
//!
//! [`SelectorError`] is the error taxonomy of the message selector engine: every failure to
//! lex, parse or evaluate a selector maps onto exactly one [`SelectorErrorKind`].
//!
//! [`FlexError`] wraps it together with the I/O, configuration and decoding failures that
//! surround selector evaluation in tools and integrations.
//!
//! ```rust
//! use flex_error::SelectorError;
//! use flex_error::SelectorErrorKind;
//!
//! let err = SelectorError::lex('&', 5);
//! assert_eq!(err.kind(), SelectorErrorKind::Lex);
//! ```

pub mod selector_error;
pub mod unified;

pub use selector_error::SelectorError;
pub use selector_error::SelectorErrorKind;
pub use selector_error::SelectorResult;
pub use unified::FlexError;
pub use unified::FlexResult;
