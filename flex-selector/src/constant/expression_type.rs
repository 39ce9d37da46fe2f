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

pub struct ExpressionType;

impl ExpressionType {
    /// SQL92 selector expression type.
    pub const SQL92: &'static str = "SQL92";

    /// Checks if the given type names the SQL92 selector dialect. A missing type defaults to it.
    pub fn is_sql92_type(type_: Option<&str>) -> bool {
        match type_ {
            None | Some("") => true,
            Some(t) => t.eq_ignore_ascii_case(ExpressionType::SQL92),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_type() {
        assert_eq!(ExpressionType::SQL92, "SQL92");
        assert!(ExpressionType::is_sql92_type(None));
        assert!(ExpressionType::is_sql92_type(Some("")));
        assert!(ExpressionType::is_sql92_type(Some("SQL92")));
        assert!(ExpressionType::is_sql92_type(Some("sql92")));
        assert!(!ExpressionType::is_sql92_type(Some("TAG")));
    }
}
