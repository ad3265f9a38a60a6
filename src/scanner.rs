//! Grammar scanner for `where` text.
//!
//! Splits filter text into [`Segment`]s: the connective window, then either a
//! parenthesized group (returned as raw inner text for recursive compilation)
//! or a flat `field operator operand` clause.
//!
//! Tokens are whitespace-delimited except inside quoted literals and `[...]`
//! arrays. A `'` opens a literal only at the start of a token and closes it
//! only when followed by whitespace, `)`, `]`, `,` or the end of input, so
//! literals may hold spaces and inner quotes (`'it's here'`). Inside `[...]` a
//! quote may also open right after `[` or `,`, and quoted items are unquoted.

use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{Clause, Connective, ConnectiveWindow, Operand, Operator, Segment, Term};
use crate::error::{QueryError, Result};

const QUOTE: char = '\'';
const OPEN_PARENTHESIS: char = '(';
const CLOSE_PARENTHESIS: char = ')';
const OPEN_ARRAY: char = '[';
const CLOSE_ARRAY: char = ']';
const ITEM_SEPARATOR: char = ',';

static CONNECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(and|or|not)(?:\s|\(|$)").expect("connective pattern is valid")
});

pub struct Scanner {
    source: String,
    input: Vec<char>,
    /// Byte offset in `source` of each char, plus `source.len()`.
    offsets: Vec<usize>,
    position: usize,
}

impl Scanner {
    pub fn new(input: &str) -> Self {
        Scanner {
            source: input.to_string(),
            input: input.chars().collect(),
            offsets: input
                .char_indices()
                .map(|(offset, _)| offset)
                .chain(std::iter::once(input.len()))
                .collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn slice(&self, from: usize, to: usize) -> String {
        self.input[from..to].iter().collect()
    }

    /// Unconsumed text, borrowed from the source.
    fn remaining(&self) -> &str {
        &self.source[self.offsets[self.position.min(self.input.len())]..]
    }

    /// Unconsumed text, used in error messages.
    fn rest(&self) -> String {
        self.remaining().to_string()
    }

    /// Reads until whitespace or one of `stops`.
    fn read_word(&mut self, stops: &[char]) -> String {
        let start = self.position;
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() || stops.contains(&ch) {
                break;
            }
            self.advance();
        }
        self.slice(start, self.position)
    }

    /// `true` while non-whitespace input remains.
    pub fn has_more(&mut self) -> bool {
        self.skip_whitespace();
        self.position < self.input.len()
    }

    /// Consumes one `and`/`or`/`not` keyword if the input starts with one.
    pub fn next_connective(&mut self) -> Option<Connective> {
        self.skip_whitespace();
        let word = CONNECTIVE.captures(self.remaining())?.get(1)?.as_str();
        let connective = Connective::parse(word)?;
        let width = word.len();
        self.position += width;
        Some(connective)
    }

    /// Consumes a balanced `( ... )` group and returns its inner text, or
    /// `None` if the input does not start with `(`.
    ///
    /// Parentheses inside quoted literals do not count towards the depth.
    pub fn next_group(&mut self) -> Result<Option<String>> {
        self.skip_whitespace();
        if self.current_char() != Some(OPEN_PARENTHESIS) {
            return Ok(None);
        }

        let start = self.position;
        let mut depth = 1usize;
        let mut inside_quotes = false;

        for i in start + 1..self.input.len() {
            match self.input[i] {
                OPEN_PARENTHESIS if !inside_quotes => depth += 1,
                QUOTE if !inside_quotes => {
                    inside_quotes = self.opens_quote(i);
                }
                QUOTE => {
                    if self.closes_quote(i) {
                        inside_quotes = false;
                    }
                }
                CLOSE_PARENTHESIS if !inside_quotes => {
                    depth -= 1;
                    if depth == 0 {
                        let inner = self.slice(start + 1, i);
                        self.position = i + 1;
                        return Ok(Some(inner));
                    }
                }
                _ => {}
            }
        }

        Err(QueryError::UnbalancedParenthesis(self.rest()))
    }

    /// A quote at `index` opens a literal when preceded by whitespace, `[`
    /// or `,`.
    fn opens_quote(&self, index: usize) -> bool {
        index
            .checked_sub(1)
            .and_then(|previous| self.input.get(previous))
            .is_some_and(|&previous| {
                previous.is_whitespace() || previous == OPEN_ARRAY || previous == ITEM_SEPARATOR
            })
    }

    /// A quote at `index` closes a literal when followed by whitespace, `)`,
    /// `]`, `,` or the end of input.
    fn closes_quote(&self, index: usize) -> bool {
        match self.input.get(index + 1) {
            None => true,
            Some(&next) => {
                next.is_whitespace()
                    || next == CLOSE_PARENTHESIS
                    || next == CLOSE_ARRAY
                    || next == ITEM_SEPARATOR
            }
        }
    }

    /// Consumes one `field operator operand` clause.
    pub fn next_clause(&mut self) -> Result<Clause> {
        self.skip_whitespace();
        let field = self.read_word(&[]);

        self.skip_whitespace();
        let operator = self.read_word(&[OPEN_PARENTHESIS, OPEN_ARRAY]);
        if operator.is_empty() {
            return Err(QueryError::MissingOperator(field));
        }

        let operand = match Operator::parse(&operator) {
            Some(Operator::Any | Operator::All) => Operand::Nested(self.next_child_query()?),
            Some(Operator::In) => Operand::Array(self.next_array()?),
            _ => {
                self.skip_whitespace();
                match self.current_char() {
                    None => return Err(QueryError::MissingOperand { field, operator }),
                    Some(QUOTE) => Operand::Literal(self.next_quoted()?),
                    Some(_) => Operand::Literal(self.read_word(&[CLOSE_PARENTHESIS])),
                }
            }
        };

        Ok(Clause {
            field,
            operator,
            operand,
        })
    }

    fn next_child_query(&mut self) -> Result<String> {
        self.next_group()?
            .ok_or_else(|| QueryError::ExpectedChildQuery(self.rest()))
    }

    fn next_array(&mut self) -> Result<Vec<String>> {
        self.skip_whitespace();
        if self.current_char() != Some(OPEN_ARRAY) {
            return Err(QueryError::ExpectedArray(self.rest()));
        }

        let start = self.position;
        let close = self.input[start..]
            .iter()
            .position(|&ch| ch == CLOSE_ARRAY)
            .map(|offset| start + offset)
            .ok_or_else(|| QueryError::UnclosedArray(self.rest()))?;

        let content = self.slice(start + 1, close);
        self.position = close + 1;

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(content
            .split(ITEM_SEPARATOR)
            .map(|item| unquote(item.trim()).to_string())
            .collect())
    }

    fn next_quoted(&mut self) -> Result<String> {
        let start = self.position;
        let close = (start + 1..self.input.len())
            .find(|&i| self.input[i] == QUOTE && self.closes_quote(i))
            .ok_or_else(|| QueryError::UnclosedQuote(self.rest()))?;

        let literal = self.slice(start + 1, close);
        self.position = close + 1;
        Ok(literal)
    }

    /// Reads the next connective window and term, or `None` at end of input.
    pub fn next_segment(&mut self) -> Result<Option<Segment>> {
        if !self.has_more() {
            return Ok(None);
        }

        let first = self.next_connective();
        let second = self.next_connective();
        let connectives = ConnectiveWindow { first, second };

        if !self.has_more() {
            return Err(QueryError::ExpectedClause(connectives.to_string()));
        }
        if self.current_char() == Some(CLOSE_PARENTHESIS) {
            return Err(QueryError::UnbalancedParenthesis(self.rest()));
        }

        let term = match self.next_group()? {
            Some(inner) => Term::Group(inner),
            None => Term::Clause(self.next_clause()?),
        };

        Ok(Some(Segment { connectives, term }))
    }
}

/// Strips one pair of surrounding quotes from an array item.
fn unquote(item: &str) -> &str {
    item.strip_prefix(QUOTE)
        .and_then(|inner| inner.strip_suffix(QUOTE))
        .unwrap_or(item)
}

/// Scans the whole of `input` into segments.
pub fn scan(input: &str) -> Result<Vec<Segment>> {
    let mut scanner = Scanner::new(input);
    let mut segments = Vec::new();
    while let Some(segment) = scanner.next_segment()? {
        segments.push(segment);
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connectives_need_a_word_boundary() {
        let mut scanner = Scanner::new("and not(Age equals 1)");
        assert_eq!(scanner.next_connective(), Some(Connective::And));
        assert_eq!(scanner.next_connective(), Some(Connective::Not));
        assert_eq!(scanner.next_connective(), None);

        let mut scanner = Scanner::new("notes equals 'x'");
        assert_eq!(scanner.next_connective(), None);
        let mut scanner = Scanner::new("order equals 'x'");
        assert_eq!(scanner.next_connective(), None);
    }

    #[test]
    fn group_ignores_parentheses_inside_quotes() {
        let mut scanner = Scanner::new("(Name equals 'a (b' or Age equals 2) and X equals 1");
        assert_eq!(
            scanner.next_group(),
            Ok(Some("Name equals 'a (b' or Age equals 2".to_string()))
        );
        assert_eq!(scanner.rest(), " and X equals 1");
    }

    #[test]
    fn group_nesting() {
        let mut scanner = Scanner::new("((A equals 1) or (B equals 2))");
        assert_eq!(
            scanner.next_group(),
            Ok(Some("(A equals 1) or (B equals 2)".to_string()))
        );
        assert!(!scanner.has_more());
    }

    #[test]
    fn unclosed_group() {
        let mut scanner = Scanner::new("(A equals 1");
        assert!(matches!(
            scanner.next_group(),
            Err(QueryError::UnbalancedParenthesis(_))
        ));
    }

    #[test]
    fn connective_after_multibyte_text() {
        let mut scanner = Scanner::new("Name equals 'Zoë' or Age equals 1");
        scanner.next_clause().unwrap();
        assert_eq!(scanner.next_connective(), Some(Connective::Or));
        assert_eq!(scanner.remaining(), " Age equals 1");
    }

    #[test]
    fn array_items_are_unquoted() {
        assert_eq!(unquote("'Ann Lee'"), "Ann Lee");
        assert_eq!(unquote("Ann"), "Ann");
        assert_eq!(unquote("'"), "'");
    }

    #[test]
    fn quoted_literal_keeps_inner_quote_and_spaces() {
        let mut scanner = Scanner::new("Name equals 'it's  here' and");
        let clause = scanner.next_clause().unwrap();
        assert_eq!(clause.operand, Operand::Literal("it's  here".to_string()));
    }
}
