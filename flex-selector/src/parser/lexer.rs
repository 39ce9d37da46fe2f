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

//! Streaming tokenizer for selector expressions.

use cheetah_string::CheetahString;
use flex_error::SelectorError;
use flex_error::SelectorResult;
use tracing::trace;

use crate::parser::token::SpannedToken;
use crate::parser::token::Token;

/// Splits a selector into tokens, left to right, on demand.
///
/// Whitespace (space, tab, CR, LF, form feed) separates tokens and is otherwise ignored.
/// Positions are byte offsets into the source.
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            failed: false,
        }
    }

    /// Lexes the whole source at once.
    pub fn tokenize(source: &'a str) -> SelectorResult<Vec<SpannedToken>> {
        Lexer::new(source).collect()
    }

    #[inline]
    fn peek_char(&self, offset: usize) -> Option<char> {
        self.source[self.pos..].chars().nth(offset)
    }

    #[inline]
    fn bump(&mut self) -> Option<char> {
        let c = self.peek_char(0)?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char(0) {
            if matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0c') {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn consume_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(c) = self.peek_char(0) {
            if !predicate(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn next_token(&mut self) -> SelectorResult<Option<SpannedToken>> {
        self.skip_whitespace();
        let start = self.pos;
        let Some(c) = self.peek_char(0) else {
            return Ok(None);
        };

        let token = match c {
            '0' if self.peek_char(1) == Some('x') && self.peek_char(2).is_some_and(|h| h.is_ascii_hexdigit()) => {
                self.lex_hex_number()?
            }
            '0'..='9' => self.lex_number()?,
            '.' if self.peek_char(1).is_some_and(|d| d.is_ascii_digit()) => self.lex_number()?,
            '\'' => self.lex_string()?,
            'a'..='z' | 'A'..='Z' | '_' => self.lex_word(),
            '>' | '<' => {
                self.bump();
                match (c, self.peek_char(0)) {
                    ('>', Some('=')) => {
                        self.bump();
                        Token::Gte
                    }
                    ('<', Some('=')) => {
                        self.bump();
                        Token::Lte
                    }
                    ('<', Some('>')) => {
                        self.bump();
                        Token::Neq
                    }
                    ('>', _) => Token::Gt,
                    _ => Token::Lt,
                }
            }
            _ => {
                let token = match c {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    '*' => Token::Times,
                    '/' => Token::Divide,
                    '=' => Token::Eq,
                    '(' => Token::LeftParen,
                    ')' => Token::RightParen,
                    ',' => Token::Comma,
                    other => return Err(SelectorError::lex(other, start)),
                };
                self.bump();
                token
            }
        };
        trace!("lexed {} at {}", token, start);
        Ok(Some(SpannedToken::new(token, start)))
    }

    fn lex_hex_number(&mut self) -> SelectorResult<Token> {
        let start = self.pos;
        self.pos += 2;
        let digits_start = self.pos;
        self.consume_while(|c| c.is_ascii_hexdigit());
        let digits = &self.source[digits_start..self.pos];
        if let Ok(value) = i64::from_str_radix(digits, 16) {
            return Ok(Token::Long(value));
        }
        // wider than i64, widen to f64 like decimal literals do
        let value = digits
            .chars()
            .filter_map(|c| c.to_digit(16))
            .fold(0f64, |acc, d| acc * 16.0 + f64::from(d));
        if value.is_finite() {
            Ok(Token::Double(value))
        } else {
            Err(SelectorError::number_out_of_range(&self.source[start..self.pos]))
        }
    }

    /// `digits[.digits][(e|E)[+|-]digits]`, where the integer part may be empty.
    fn lex_number(&mut self) -> SelectorResult<Token> {
        let start = self.pos;
        self.consume_while(|c| c.is_ascii_digit());
        let mut is_float = false;
        if self.peek_char(0) == Some('.') && self.peek_char(1).is_some_and(|d| d.is_ascii_digit()) {
            is_float = true;
            self.pos += 1;
            self.consume_while(|c| c.is_ascii_digit());
        }
        let mantissa_end = self.pos;

        let mut exponent_start = None;
        if matches!(self.peek_char(0), Some('e' | 'E')) {
            let sign_len = usize::from(matches!(self.peek_char(1), Some('+' | '-')));
            if self.peek_char(1 + sign_len).is_some_and(|d| d.is_ascii_digit()) {
                self.pos += 1;
                exponent_start = Some(self.pos);
                self.pos += sign_len;
                self.consume_while(|c| c.is_ascii_digit());
            }
        }

        let text = &self.source[start..self.pos];
        let out_of_range = || SelectorError::number_out_of_range(text);
        if is_float {
            return text.parse::<f64>().map(Token::Double).map_err(|_| out_of_range());
        }

        let Ok(mantissa) = self.source[start..mantissa_end].parse::<i64>() else {
            return text.parse::<f64>().map(Token::Double).map_err(|_| out_of_range());
        };
        let Some(exponent_start) = exponent_start else {
            return Ok(Token::Long(mantissa));
        };

        let exponent = &self.source[exponent_start..self.pos];
        let scaled = if exponent.starts_with('-') {
            None
        } else {
            exponent
                .trim_start_matches('+')
                .parse::<u32>()
                .ok()
                .and_then(|e| 10i64.checked_pow(e))
                .and_then(|scale| mantissa.checked_mul(scale))
        };
        match scaled {
            Some(value) => Ok(Token::Long(value)),
            None => text.parse::<f64>().map(Token::Double).map_err(|_| out_of_range()),
        }
    }

    /// Single-quoted string. `\'` and `\\` resolve to `'` and `\`; other backslash pairs are
    /// kept as written so that LIKE patterns still see their escape characters.
    fn lex_string(&mut self) -> SelectorResult<Token> {
        let start = self.pos;
        self.bump();
        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err(SelectorError::lex('\'', start)),
                Some('\'') => break,
                Some('\\') => match self.bump() {
                    None => return Err(SelectorError::lex('\'', start)),
                    Some(c @ ('\'' | '\\')) => value.push(c),
                    Some(c) => {
                        value.push('\\');
                        value.push(c);
                    }
                },
                Some(c) => value.push(c),
            }
        }
        Ok(Token::String(CheetahString::from_string(value)))
    }

    fn lex_word(&mut self) -> Token {
        let start = self.pos;
        self.consume_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let word = &self.source[start..self.pos];
        match word {
            "true" => Token::Boolean(true),
            "false" => Token::Boolean(false),
            _ => Token::reserved(word).unwrap_or_else(|| Token::Variable(CheetahString::from_slice(word))),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = SelectorResult<SpannedToken>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = self.next_token();
        if result.is_err() {
            self.failed = true;
        }
        result.transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        Lexer::tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    fn var(name: &str) -> Token {
        Token::Variable(CheetahString::from_slice(name))
    }

    fn string(value: &str) -> Token {
        Token::String(CheetahString::from_slice(value))
    }

    #[test]
    fn integers_and_floats() {
        assert_eq!(tokens("42"), vec![Token::Long(42)]);
        assert_eq!(tokens("1.5"), vec![Token::Double(1.5)]);
        assert_eq!(tokens(".5"), vec![Token::Double(0.5)]);
        assert_eq!(tokens("007"), vec![Token::Long(7)]);
    }

    #[test]
    fn hex_numbers() {
        assert_eq!(tokens("0xff"), vec![Token::Long(255)]);
        assert_eq!(tokens("0x10F"), vec![Token::Long(271)]);
        // without hex digits the prefix is a zero followed by a variable
        assert_eq!(tokens("0x"), vec![Token::Long(0), var("x")]);
    }

    #[test]
    fn exponents() {
        assert_eq!(tokens("3e2"), vec![Token::Long(300)]);
        assert_eq!(tokens("5e+2"), vec![Token::Long(500)]);
        assert_eq!(tokens("5E0"), vec![Token::Long(5)]);
        assert_eq!(tokens("2e-2"), vec![Token::Double(0.02)]);
        assert_eq!(tokens("1.5e2"), vec![Token::Double(150.0)]);
        assert_eq!(tokens("5e30"), vec![Token::Double(5e30)]);
        // a dangling exponent marker is not part of the number
        assert_eq!(tokens("2e"), vec![Token::Long(2), var("e")]);
    }

    #[test]
    fn integers_beyond_i64_widen_to_double() {
        assert_eq!(tokens("9223372036854775807"), vec![Token::Long(i64::MAX)]);
        assert_eq!(tokens("9223372036854775808"), vec![Token::Double(9223372036854775808.0)]);
        assert_eq!(tokens("99999999999999999999"), vec![Token::Double(1e20)]);
        assert_eq!(tokens("99999999999999999999e2"), vec![Token::Double(1e22)]);
        assert_eq!(tokens("0x7fffffffffffffff"), vec![Token::Long(i64::MAX)]);
        assert_eq!(tokens("0x10000000000000000"), vec![Token::Double(18446744073709551616.0)]);
        assert_eq!(tokens("0xffffffffffffffffff"), vec![Token::Double(4722366482869645213696.0)]);
    }

    #[test]
    fn hex_beyond_f64_is_out_of_range() {
        let source = format!("0x{}", "f".repeat(300));
        let err = Lexer::tokenize(&source).unwrap_err();
        assert_eq!(err, SelectorError::number_out_of_range(source.as_str()));
    }

    #[test]
    fn strings() {
        assert_eq!(tokens("'abc'"), vec![string("abc")]);
        assert_eq!(tokens("''"), vec![string("")]);
        assert_eq!(tokens(r"'it\'s'"), vec![string("it's")]);
        assert_eq!(tokens(r"'a\\b'"), vec![string(r"a\b")]);
        assert_eq!(tokens(r"'\n\%'"), vec![string(r"\n\%")]);
        assert_eq!(tokens("'héllo wörld'"), vec![string("héllo wörld")]);
    }

    #[test]
    fn unterminated_string() {
        let err = Lexer::tokenize("x = 'abc").unwrap_err();
        assert_eq!(err, SelectorError::lex('\'', 4));
    }

    #[test]
    fn booleans_are_lowercase_only() {
        assert_eq!(tokens("true false"), vec![Token::Boolean(true), Token::Boolean(false)]);
        assert_eq!(tokens("TRUE"), vec![var("TRUE")]);
        assert_eq!(tokens("trueish"), vec![var("trueish")]);
    }

    #[test]
    fn reserved_words_and_variables() {
        assert_eq!(
            tokens("a AND b or Not c"),
            vec![var("a"), Token::And, var("b"), Token::Or, Token::Not, var("c")]
        );
        assert_eq!(
            tokens("x is null escape"),
            vec![var("x"), Token::Is, Token::Null, Token::Escape]
        );
        assert_eq!(tokens("_Var_1"), vec![var("_Var_1")]);
    }

    #[test]
    fn operators_prefer_two_characters() {
        assert_eq!(
            tokens(">= <= <> > < = + - * / ( ) ,"),
            vec![
                Token::Gte,
                Token::Lte,
                Token::Neq,
                Token::Gt,
                Token::Lt,
                Token::Eq,
                Token::Plus,
                Token::Minus,
                Token::Times,
                Token::Divide,
                Token::LeftParen,
                Token::RightParen,
                Token::Comma,
            ]
        );
        assert_eq!(tokens("a<>b"), vec![var("a"), Token::Neq, var("b")]);
        assert_eq!(tokens("a< >b"), vec![var("a"), Token::Lt, Token::Gt, var("b")]);
    }

    #[test]
    fn whitespace_is_skipped() {
        assert_eq!(tokens(" \t\r\n\x0c1\n"), vec![Token::Long(1)]);
        assert!(tokens("   ").is_empty());
    }

    #[test]
    fn positions_are_byte_offsets() {
        let spanned = Lexer::tokenize("ab >= 'é' + 1").unwrap();
        let positions: Vec<usize> = spanned.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 3, 6, 11, 13]);
    }

    #[test]
    fn illegal_character() {
        let err = Lexer::tokenize("true & false").unwrap_err();
        assert_eq!(err, SelectorError::lex('&', 5));

        let err = Lexer::tokenize("a != b").unwrap_err();
        assert_eq!(err, SelectorError::lex('!', 2));

        let err = Lexer::tokenize("1.").unwrap_err();
        assert_eq!(err, SelectorError::lex('.', 1));
    }

    #[test]
    fn lexing_stops_after_first_error() {
        let mut lexer = Lexer::new("a # b");
        assert!(matches!(lexer.next(), Some(Ok(_))));
        assert!(matches!(lexer.next(), Some(Err(_))));
        assert!(lexer.next().is_none());
    }
}
