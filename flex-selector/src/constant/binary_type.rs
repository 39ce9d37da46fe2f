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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryType {
    // arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    // comparison
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    // logical
    And,
    Or,
}

impl BinaryType {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryType::Add => "+",
            BinaryType::Subtract => "-",
            BinaryType::Multiply => "*",
            BinaryType::Divide => "/",
            BinaryType::Equal => "=",
            BinaryType::NotEqual => "<>",
            BinaryType::GreaterThan => ">",
            BinaryType::GreaterThanOrEqual => ">=",
            BinaryType::LessThan => "<",
            BinaryType::LessThanOrEqual => "<=",
            BinaryType::And => "AND",
            BinaryType::Or => "OR",
        }
    }

    #[inline]
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinaryType::Add | BinaryType::Subtract | BinaryType::Multiply | BinaryType::Divide
        )
    }

    #[inline]
    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryType::And | BinaryType::Or)
    }

    /// `=` and `<>`, which accept operands of any type.
    #[inline]
    pub fn is_equality(&self) -> bool {
        matches!(self, BinaryType::Equal | BinaryType::NotEqual)
    }
}

impl fmt::Display for BinaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_type_classification() {
        assert!(BinaryType::Divide.is_arithmetic());
        assert!(!BinaryType::Equal.is_arithmetic());
        assert!(BinaryType::Or.is_logical());
        assert!(BinaryType::NotEqual.is_equality());
        assert!(!BinaryType::GreaterThan.is_equality());
        assert!(!BinaryType::GreaterThan.is_logical());
    }

    #[test]
    fn test_binary_type_display() {
        assert_eq!(BinaryType::NotEqual.to_string(), "<>");
        assert_eq!(BinaryType::GreaterThanOrEqual.to_string(), ">=");
        assert_eq!(BinaryType::And.to_string(), "AND");
    }
}
