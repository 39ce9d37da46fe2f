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

use std::collections::VecDeque;

use flex_error::SelectorError;
use flex_error::SelectorResult;

use crate::constant::binary_type::BinaryType;
use crate::expression::between_expression::BetweenExpression;
use crate::expression::binary_expression::BinaryExpression;
use crate::expression::leaf_expression::ConstantExpression;
use crate::expression::leaf_expression::VariableExpression;
use crate::expression::unary_expression::InExpression;
use crate::expression::unary_expression::LikeExpression;
use crate::expression::unary_expression::NullExpression;
use crate::expression::unary_expression::UnaryExpression;
use crate::expression::Expression;
use crate::parser::lexer::Lexer;
use crate::parser::token::SpannedToken;
use crate::parser::token::Token;
use crate::utils::like_matcher::DEFAULT_ESCAPE;

/// Binding level of `IN`: every pending operator applies first, so `IN` takes the whole
/// expression on its left and the result may be used as an operand again.
const LEVEL_MEMBERSHIP: u8 = 0;
/// Binding level of `BETWEEN` and `LIKE`.
const LEVEL_PATTERN: u8 = 1;
/// Binding level of `AND` and `OR`.
const LEVEL_LOGICAL: u8 = 2;
/// Binding level of the comparisons.
const LEVEL_COMPARISON: u8 = 3;
const LEVEL_ADDITIVE: u8 = 4;
const LEVEL_MULTIPLICATIVE: u8 = 5;
const LEVEL_UNARY: u8 = 6;

/// Parentheses, unary minus and operands may nest this deep.
const MAX_NESTING_DEPTH: usize = 256;
/// Evaluation walks the tree recursively, so its height is bounded as well.
const MAX_TREE_HEIGHT: usize = 1024;

/// An infix or postfix operator found after a complete operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Binary(BinaryType),
    Between { not: bool },
    Like { not: bool },
    In { not: bool },
}

impl Operator {
    fn level(self) -> u8 {
        match self {
            Operator::Binary(binary_type) => match binary_type {
                BinaryType::Multiply | BinaryType::Divide => LEVEL_MULTIPLICATIVE,
                BinaryType::Add | BinaryType::Subtract => LEVEL_ADDITIVE,
                BinaryType::And | BinaryType::Or => LEVEL_LOGICAL,
                _ => LEVEL_COMPARISON,
            },
            Operator::Between { .. } | Operator::Like { .. } => LEVEL_PATTERN,
            Operator::In { .. } => LEVEL_MEMBERSHIP,
        }
    }

    fn is_nonassociative(self) -> bool {
        self.level() == LEVEL_PATTERN || self.level() == LEVEL_COMPARISON
    }

    /// Tokens the operator occupies; `NOT` counts as one.
    fn width(self) -> usize {
        match self {
            Operator::Between { not } | Operator::Like { not } | Operator::In { not } if not => 2,
            _ => 1,
        }
    }
}

/// The operator a token starts; `negated` is set once a leading `NOT` has been consumed.
fn operator_of(token: &Token, negated: bool) -> Option<Operator> {
    let binary_type = match token {
        Token::Between => return Some(Operator::Between { not: negated }),
        Token::Like => return Some(Operator::Like { not: negated }),
        Token::In => return Some(Operator::In { not: negated }),
        _ if negated => return None,
        Token::Plus => BinaryType::Add,
        Token::Minus => BinaryType::Subtract,
        Token::Times => BinaryType::Multiply,
        Token::Divide => BinaryType::Divide,
        Token::Eq => BinaryType::Equal,
        Token::Neq => BinaryType::NotEqual,
        Token::Gt => BinaryType::GreaterThan,
        Token::Gte => BinaryType::GreaterThanOrEqual,
        Token::Lt => BinaryType::LessThan,
        Token::Lte => BinaryType::LessThanOrEqual,
        Token::And => BinaryType::And,
        Token::Or => BinaryType::Or,
        _ => return None,
    };
    Some(Operator::Binary(binary_type))
}

/// Precedence-climbing parser turning a selector into an expression tree.
///
/// Tokens are pulled from the [`Lexer`] only as far as the parser has looked ahead, so the
/// first problem in reading order is the one reported.
pub struct SelectorParser<'a> {
    source: &'a str,
    lexer: Lexer<'a>,
    lookahead: VecDeque<SpannedToken>,
    depth: usize,
}

/// A parsed subtree with its height, leaves counting as one.
struct Node {
    expression: Box<dyn Expression>,
    height: usize,
}

impl Node {
    fn leaf(expression: Box<dyn Expression>) -> Self {
        Node { expression, height: 1 }
    }

    /// A node one level above its tallest child.
    fn branch(expression: Box<dyn Expression>, child_height: usize) -> Self {
        Node {
            expression,
            height: child_height + 1,
        }
    }
}

impl<'a> SelectorParser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            lexer: Lexer::new(source),
            lookahead: VecDeque::with_capacity(2),
            depth: 0,
        }
    }

    /// Parses the whole source as one expression.
    pub fn parse(mut self) -> SelectorResult<Box<dyn Expression>> {
        let node = self.parse_expression(LEVEL_MEMBERSHIP)?;
        match self.advance()? {
            None => Ok(node.expression),
            Some(unexpected) => Err(Self::unexpected(&unexpected)),
        }
    }

    fn peek_nth(&mut self, n: usize) -> SelectorResult<Option<&SpannedToken>> {
        while self.lookahead.len() <= n {
            match self.lexer.next() {
                Some(token) => self.lookahead.push_back(token?),
                None => break,
            }
        }
        Ok(self.lookahead.get(n))
    }

    fn peek(&mut self) -> SelectorResult<Option<&Token>> {
        Ok(self.peek_nth(0)?.map(|spanned| &spanned.token))
    }

    fn advance(&mut self) -> SelectorResult<Option<SpannedToken>> {
        self.peek_nth(0)?;
        Ok(self.lookahead.pop_front())
    }

    /// Offset of the next token, or the input length at end of input.
    fn position(&self) -> usize {
        self.lookahead.front().map_or(self.source.len(), |spanned| spanned.position)
    }

    fn too_deep(&mut self) -> SelectorResult<SelectorError> {
        self.peek()?;
        Ok(SelectorError::syntax("expression nested too deeply", self.position()))
    }

    fn end_of_input(&self) -> SelectorError {
        SelectorError::syntax("unexpected end of input", self.source.len())
    }

    fn unexpected(spanned: &SpannedToken) -> SelectorError {
        SelectorError::syntax(format!("unexpected {}", spanned.token), spanned.position)
    }

    fn expect(&mut self, expected: Token) -> SelectorResult<SpannedToken> {
        match self.advance()? {
            Some(spanned) if spanned.token == expected => Ok(spanned),
            Some(spanned) => Err(SelectorError::syntax(
                format!("expected {expected} but found {}", spanned.token),
                spanned.position,
            )),
            None => Err(SelectorError::syntax(
                format!("expected {expected} but reached end of input"),
                self.source.len(),
            )),
        }
    }

    /// Classifies the upcoming operator, if the next token starts one.
    fn peek_operator(&mut self) -> SelectorResult<Option<Operator>> {
        match self.peek()? {
            None => return Ok(None),
            Some(Token::Not) => {}
            Some(token) => return Ok(operator_of(token, false)),
        }
        match self.peek_nth(1)? {
            Some(spanned) => match operator_of(&spanned.token, true) {
                Some(operator) => Ok(Some(operator)),
                None => Err(SelectorError::syntax(
                    format!("NOT must be followed by BETWEEN, IN or LIKE; found {}", spanned.token),
                    spanned.position,
                )),
            },
            None => Err(self.end_of_input()),
        }
    }

    fn parse_expression(&mut self, min_level: u8) -> SelectorResult<Node> {
        if self.depth == MAX_NESTING_DEPTH {
            return Err(self.too_deep()?);
        }
        self.depth += 1;
        let node = self.parse_operators(min_level);
        self.depth -= 1;
        node
    }

    fn parse_operators(&mut self, min_level: u8) -> SelectorResult<Node> {
        let mut left = self.parse_prefix()?;
        // level of the last nonassociative operator applied in this loop
        let mut chained: Option<u8> = None;

        while let Some(operator) = self.peek_operator()? {
            let level = operator.level();
            if level < min_level {
                break;
            }
            if chained == Some(level) {
                return Err(SelectorError::syntax(
                    "comparison and pattern operators cannot be chained",
                    self.position(),
                ));
            }
            for _ in 0..operator.width() {
                self.advance()?;
            }

            let node = match operator {
                Operator::Binary(binary_type) => {
                    let right = self.parse_expression(level + 1)?;
                    Node::branch(
                        Box::new(BinaryExpression::new(binary_type, left.expression, right.expression)),
                        left.height.max(right.height),
                    )
                }
                Operator::Between { not } => {
                    let low = self.parse_between_bound()?;
                    self.expect(Token::And)?;
                    let high = self.parse_between_bound()?;
                    Node::branch(
                        Box::new(BetweenExpression::new(left.expression, low, high, not)),
                        left.height,
                    )
                }
                Operator::Like { not } => {
                    let pattern = self.parse_expression(LEVEL_LOGICAL)?;
                    let escape = self.parse_escape()?;
                    Node::branch(
                        Box::new(LikeExpression::new(left.expression, pattern.expression, escape, not)),
                        left.height.max(pattern.height),
                    )
                }
                Operator::In { not } => {
                    let (list, list_height) = self.parse_in_list()?;
                    Node::branch(
                        Box::new(InExpression::new(left.expression, list, not)),
                        left.height.max(list_height),
                    )
                }
            };
            if node.height > MAX_TREE_HEIGHT {
                return Err(self.too_deep()?);
            }
            left = node;
            chained = operator.is_nonassociative().then_some(level);
        }
        Ok(left)
    }

    fn parse_prefix(&mut self) -> SelectorResult<Node> {
        let Some(spanned) = self.advance()? else {
            return Err(self.end_of_input());
        };
        let node = match spanned.token {
            Token::Long(v) => Node::leaf(Box::new(ConstantExpression::new(v))),
            Token::Double(v) => Node::leaf(Box::new(ConstantExpression::new(v))),
            Token::String(s) => Node::leaf(Box::new(ConstantExpression::new(s))),
            Token::Boolean(b) => Node::leaf(Box::new(ConstantExpression::new(b))),
            Token::Variable(name) => {
                if self.peek()? == Some(&Token::Is) {
                    self.advance()?;
                    let not = if self.peek()? == Some(&Token::Not) {
                        self.advance()?;
                        true
                    } else {
                        false
                    };
                    self.expect(Token::Null)?;
                    Node::leaf(Box::new(NullExpression::new(name, not)))
                } else {
                    Node::leaf(Box::new(VariableExpression::new(name)))
                }
            }
            Token::Minus => {
                let operand = self.parse_expression(LEVEL_UNARY)?;
                let node = Node::branch(Box::new(UnaryExpression::negate(operand.expression)), operand.height);
                if node.height > MAX_TREE_HEIGHT {
                    return Err(self.too_deep()?);
                }
                node
            }
            Token::LeftParen => {
                let inner = self.parse_expression(LEVEL_MEMBERSHIP)?;
                self.expect(Token::RightParen)?;
                inner
            }
            _ => return Err(Self::unexpected(&spanned)),
        };
        Ok(node)
    }

    /// A `BETWEEN` bound is a bare variable or a bare number.
    fn parse_between_bound(&mut self) -> SelectorResult<Box<dyn Expression>> {
        let Some(spanned) = self.advance()? else {
            return Err(self.end_of_input());
        };
        match spanned.token {
            Token::Variable(name) => Ok(Box::new(VariableExpression::new(name))),
            Token::Long(v) => Ok(Box::new(ConstantExpression::new(v))),
            Token::Double(v) => Ok(Box::new(ConstantExpression::new(v))),
            other => Err(SelectorError::syntax(
                format!("BETWEEN bounds must be a variable or a number; found {other}"),
                spanned.position,
            )),
        }
    }

    fn parse_escape(&mut self) -> SelectorResult<char> {
        if self.peek()? != Some(&Token::Escape) {
            return Ok(DEFAULT_ESCAPE);
        }
        self.advance()?;
        let Some(spanned) = self.advance()? else {
            return Err(self.end_of_input());
        };
        let Token::String(escape) = spanned.token else {
            return Err(SelectorError::syntax(
                format!("ESCAPE requires a string; found {}", spanned.token),
                spanned.position,
            ));
        };
        let mut chars = escape.as_str().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(SelectorError::syntax(
                "ESCAPE requires a single character string",
                spanned.position,
            )),
        }
    }

    /// The parenthesized `IN` list and the height of its tallest element.
    fn parse_in_list(&mut self) -> SelectorResult<(Vec<Box<dyn Expression>>, usize)> {
        self.expect(Token::LeftParen)?;
        let mut list = Vec::new();
        let mut height = 0;
        loop {
            let element = self.parse_expression(LEVEL_MEMBERSHIP)?;
            height = height.max(element.height);
            list.push(element.expression);
            if self.peek()? != Some(&Token::Comma) {
                break;
            }
            self.advance()?;
        }
        self.expect(Token::RightParen)?;
        Ok((list, height))
    }
}

#[cfg(test)]
mod tests {
    use flex_error::SelectorErrorKind;

    use super::*;

    fn canonical(source: &str) -> String {
        SelectorParser::new(source).parse().unwrap().to_string()
    }

    fn syntax_error(source: &str) -> SelectorError {
        let err = SelectorParser::new(source).parse().unwrap_err();
        assert_eq!(err.kind(), SelectorErrorKind::Syntax, "{source}: {err}");
        err
    }

    #[test]
    fn arithmetic_precedence() {
        assert_eq!(canonical("1 + 2 * 3"), "(1 + (2 * 3))");
        assert_eq!(canonical("1 - 2 - 3"), "((1 - 2) - 3)");
        assert_eq!(canonical("8 / 4 / 2"), "((8 / 4) / 2)");
        assert_eq!(canonical("(1 + 2) * 3"), "((1 + 2) * 3)");
        assert_eq!(canonical("-a * b"), "((-a) * b)");
        assert_eq!(canonical("- - 3"), "(-(-3))");
    }

    #[test]
    fn comparisons_bind_tighter_than_logical() {
        assert_eq!(canonical("a = 1 AND b > 2"), "((a = 1) AND (b > 2))");
        assert_eq!(canonical("a or b and c"), "((a OR b) AND c)");
        assert_eq!(canonical("1 + 2 = 3"), "((1 + 2) = 3)");
        assert_eq!(canonical("x <> 'y'"), "(x <> 'y')");
    }

    #[test]
    fn between_binds_loosest() {
        assert_eq!(canonical("4 between 2 and 6"), "(4 BETWEEN 2 AND 6)");
        assert_eq!(canonical("x not between a and 5.5"), "(x NOT BETWEEN a AND 5.5)");
        assert_eq!(canonical("x between 1 and 5 and y"), "((x BETWEEN 1 AND 5) AND y)");
        assert_eq!(canonical("y and x between 1 and 5"), "((y AND x) BETWEEN 1 AND 5)");
    }

    #[test]
    fn between_bounds_are_bare() {
        syntax_error("x between 1 + 1 and 5");
        syntax_error("x between -1 and 5");
        syntax_error("x between 'a' and 'b'");
        let err = syntax_error("x between (1) and 5");
        assert_eq!(err, SelectorError::syntax("BETWEEN bounds must be a variable or a number; found '('", 10));
    }

    #[test]
    fn like_pattern_and_escape() {
        assert_eq!(canonical("name like 'a%'"), "(name LIKE 'a%')");
        assert_eq!(canonical("name not like 'a*%' escape '*'"), "(name NOT LIKE 'a*%' ESCAPE '*')");
        assert_eq!(canonical("name like 'a' and b"), "(name LIKE ('a' AND b))");
        syntax_error("name like 'a' escape 'ab'");
        syntax_error("name like 'a' escape ''");
        syntax_error("name like 'a' escape 1");
    }

    #[test]
    fn in_lists() {
        assert_eq!(canonical("x in ('a', 'b')"), "(x IN ('a', 'b'))");
        assert_eq!(canonical("x not in (1 + 1, y)"), "(x NOT IN ((1 + 1), y))");
        assert_eq!(canonical("x + 1 in (2)"), "((x + 1) IN (2))");
        assert_eq!(canonical("(a in (1)) and b"), "((a IN (1)) AND b)");
        syntax_error("x in ()");
        syntax_error("x in (1,)");
        syntax_error("x in 1");
    }

    #[test]
    fn in_applies_to_everything_on_its_left() {
        assert_eq!(canonical("a and x in (1)"), "((a AND x) IN (1))");
        assert_eq!(canonical("1 = x in (true)"), "((1 = x) IN (true))");
        assert_eq!(canonical("x between 1 and 5 in (true)"), "((x BETWEEN 1 AND 5) IN (true))");
        assert_eq!(canonical("x like 'a%' not in (false)"), "((x LIKE 'a%') NOT IN (false))");
        assert_eq!(canonical("-x in (1)"), "((-x) IN (1))");
    }

    #[test]
    fn in_result_is_an_operand() {
        assert_eq!(canonical("x in (1) = true"), "((x IN (1)) = true)");
        assert_eq!(canonical("x in (1) and y"), "((x IN (1)) AND y)");
        assert_eq!(canonical("x in (1) in (true)"), "((x IN (1)) IN (true))");
        assert_eq!(canonical("a = b in (1) = c"), "(((a = b) IN (1)) = c)");
        syntax_error("x in (1) = true = false");
    }

    #[test]
    fn infinite_literals_render_parseable() {
        let rendered = canonical("x > 1e400");
        assert_eq!(rendered, "(x > 1e999)");
        assert_eq!(canonical(&rendered), rendered);
    }

    #[test]
    fn nesting_depth_is_bounded() {
        let nested = |depth: usize| format!("{}1{} = 1", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(canonical(&nested(200)), "(1 = 1)");

        let err = syntax_error(&nested(50_000));
        assert_eq!(err, SelectorError::syntax("expression nested too deeply", MAX_NESTING_DEPTH));

        let negated = format!("{}1", "-".repeat(50_000));
        assert_eq!(
            syntax_error(&negated),
            SelectorError::syntax("expression nested too deeply", MAX_NESTING_DEPTH)
        );
    }

    #[test]
    fn tree_height_is_bounded() {
        let chain = |terms: usize| vec!["1"; terms].join(" + ");
        assert!(SelectorParser::new(&chain(MAX_TREE_HEIGHT)).parse().is_ok());

        let err = syntax_error(&chain(50_000));
        // reported at the operator after the first term that no longer fits
        assert_eq!(
            err,
            SelectorError::syntax("expression nested too deeply", 4 * MAX_TREE_HEIGHT + 2)
        );
    }

    #[test]
    fn is_null_follows_variables_only() {
        assert_eq!(canonical("somevar is null"), "(somevar IS NULL)");
        assert_eq!(canonical("somevar IS NOT NULL"), "(somevar IS NOT NULL)");
        assert_eq!(canonical("a is null or b is not null"), "((a IS NULL) OR (b IS NOT NULL))");
        syntax_error("1 is null");
        syntax_error("(a) is null");
        syntax_error("a is 1");
    }

    #[test]
    fn nonassociative_operators_do_not_chain() {
        syntax_error("a = b = c");
        syntax_error("1 < 2 > 3");
        syntax_error("x like 'a' like 'b'");
        syntax_error("x between 1 and 2 like 'a'");
        assert_eq!(canonical("(a = b) = c"), "((a = b) = c)");
    }

    #[test]
    fn not_needs_a_pattern_operator() {
        let err = syntax_error("a not = b");
        assert_eq!(
            err,
            SelectorError::syntax("NOT must be followed by BETWEEN, IN or LIKE; found '='", 6)
        );
        syntax_error("not a");
        syntax_error("a not");
    }

    #[test]
    fn malformed_input() {
        assert_eq!(syntax_error(""), SelectorError::syntax("unexpected end of input", 0));
        assert_eq!(syntax_error("2 > > 2"), SelectorError::syntax("unexpected '>'", 4));
        assert_eq!(
            syntax_error("(1 = 1"),
            SelectorError::syntax("expected ')' but reached end of input", 6)
        );
        assert_eq!(syntax_error("1 = 1)"), SelectorError::syntax("unexpected ')'", 5));
        syntax_error("1 +");
        syntax_error("a b");
    }

    #[test]
    fn lex_errors_surface_in_reading_order() {
        let err = SelectorParser::new("true & false").parse().unwrap_err();
        assert_eq!(err, SelectorError::lex('&', 5));

        // the syntax error comes first in the source
        let err = SelectorParser::new("> 1 & 2").parse().unwrap_err();
        assert_eq!(err.kind(), SelectorErrorKind::Syntax);
    }
}
