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

/// Operators of expressions with a single subject operand.
///
/// `In`, `Like` and `IsNull` carry extra operands (a list, a pattern, nothing) but are
/// evaluated against exactly one subject, the same way negation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryType {
    Negate,
    In,
    Like,
    IsNull,
}

impl UnaryType {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryType::Negate => "-",
            UnaryType::In => "IN",
            UnaryType::Like => "LIKE",
            UnaryType::IsNull => "IS NULL",
        }
    }
}

impl fmt::Display for UnaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unary_type_debug() {
        assert_eq!(format!("{:?}", UnaryType::Negate), "Negate");
        assert_eq!(format!("{:?}", UnaryType::In), "In");
        assert_eq!(format!("{:?}", UnaryType::Like), "Like");
        assert_eq!(format!("{:?}", UnaryType::IsNull), "IsNull");
    }

    #[test]
    fn test_unary_type_symbol() {
        assert_eq!(UnaryType::Negate.to_string(), "-");
        assert_eq!(UnaryType::In.to_string(), "IN");
        assert_eq!(UnaryType::Like.to_string(), "LIKE");
        assert_eq!(UnaryType::IsNull.to_string(), "IS NULL");
    }
}
