//! Cursor over in-memory tree text.
//!
//! Tree files are read and preprocessed as a whole (see
//! [preprocess](crate::parser::preprocess)), so [ByteParser] simply borrows
//! the resulting text and walks it byte by byte. Unquoted labels and numbers
//! are handed out as slices of the input; only quoted labels with doubled
//! quotes need a fresh allocation.

use crate::parser::parsing_error::{ParsingError, ParsingErrorType};
use std::borrow::Cow;

/// Number of bytes after the error position quoted in a [ParsingError]
const ERROR_CONTEXT_LEN: usize = 40;

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================$=
/// Byte cursor with the primitives both tree readers need.
///
/// - blanks and `[...]` comments are skipped together
/// - keywords match ASCII case-insensitively
/// - labels are either unquoted (ended by a delimiter set) or single-quoted
///   with `''` standing for an apostrophe
///
/// # Example
/// ```
/// use rtt_reconcile::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("BEGIN trees; [written by TreeTime] TREE t1 = (A,B);");
/// assert!(parser.consume_if_word("begin"));
/// assert_eq!(parser.parse_label(b";").unwrap(), "trees");
/// assert!(parser.consume_if(b';'));
/// parser.skip_comment_and_whitespace().unwrap();
/// assert!(parser.peek_is_word("Tree"));
/// ```
#[derive(Debug, Clone)]
pub struct ByteParser<'a> {
    text: &'a [u8],
    pos: usize,
}

impl<'a> ByteParser<'a> {
    /// Creates a cursor at the start of `text`.
    pub fn for_str(text: &'a str) -> Self {
        Self {
            text: text.as_bytes(),
            pos: 0,
        }
    }

    /// Returns the current byte without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.text.get(self.pos).copied()
    }

    /// Consumes and returns the current byte.
    #[inline]
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Returns whether all input has been consumed.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Returns the byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn rest(&self) -> &'a [u8] {
        &self.text[self.pos.min(self.text.len())..]
    }

    /// Skips ASCII whitespace.
    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Skips any mix of whitespace and `[...]` comments.
    ///
    /// # Errors
    /// [ParsingErrorType::UnclosedComment] if a `[` has no matching `]`.
    pub fn skip_comment_and_whitespace(&mut self) -> Result<(), ParsingError> {
        loop {
            self.skip_whitespace();
            if !self.peek_is(b'[') {
                return Ok(());
            }
            match self.rest().iter().position(|&b| b == b']') {
                Some(offset) => self.pos += offset + 1,
                None => return Err(self.error(ParsingErrorType::UnclosedComment)),
            }
        }
    }

    /// Returns whether the current byte is `byte`.
    #[inline]
    pub fn peek_is(&self, byte: u8) -> bool {
        self.peek() == Some(byte)
    }

    /// Consumes the current byte if it is `byte`.
    pub fn consume_if(&mut self, byte: u8) -> bool {
        let found = self.peek_is(byte);
        if found {
            self.pos += 1;
        }
        found
    }

    /// Returns whether the input continues with `word`, ignoring ASCII case.
    pub fn peek_is_word(&self, word: &str) -> bool {
        self.rest()
            .get(..word.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(word.as_bytes()))
    }

    /// Consumes `word` (ignoring ASCII case) if the input continues with it.
    pub fn consume_if_word(&mut self, word: &str) -> bool {
        let found = self.peek_is_word(word);
        if found {
            self.pos += word.len();
        }
        found
    }

    /// Moves past the next `target` byte.
    ///
    /// Returns `false`, leaving the cursor at the end, if there is none.
    pub fn skip_past(&mut self, target: u8) -> bool {
        match self.rest().iter().position(|&b| b == target) {
            Some(offset) => {
                self.pos += offset + 1;
                true
            }
            None => {
                self.pos = self.text.len();
                false
            }
        }
    }

    /// Consumes bytes while `keep` holds and returns them.
    pub fn take_while(&mut self, keep: impl Fn(u8) -> bool) -> Cow<'a, str> {
        let start = self.pos;
        while self.peek().is_some_and(&keep) {
            self.pos += 1;
        }
        String::from_utf8_lossy(&self.text[start..self.pos])
    }

    /// Parses a quoted or unquoted label after skipping blanks and comments.
    ///
    /// An unquoted label ends before the first byte of `delimiters` and may
    /// be empty.
    ///
    /// # Errors
    /// [ParsingErrorType::UnclosedQuote] if a quoted label is not closed, or
    /// an error of [skip_comment_and_whitespace](Self::skip_comment_and_whitespace).
    pub fn parse_label(&mut self, delimiters: &[u8]) -> Result<String, ParsingError> {
        self.skip_comment_and_whitespace()?;
        if self.peek_is(b'\'') {
            self.parse_quoted_label()
        } else {
            Ok(self.take_while(|b| !delimiters.contains(&b)).into_owned())
        }
    }

    /// Parses `'...'`, turning `''` into `'`. The cursor must be on the opening quote.
    fn parse_quoted_label(&mut self) -> Result<String, ParsingError> {
        let opening = self.pos;
        self.pos += 1;

        let mut label = Vec::new();
        loop {
            match self.next_byte() {
                Some(b'\'') if self.consume_if(b'\'') => label.push(b'\''),
                Some(b'\'') => return Ok(String::from_utf8_lossy(&label).into_owned()),
                Some(byte) => label.push(byte),
                None => {
                    self.pos = opening;
                    return Err(self.error(ParsingErrorType::UnclosedQuote));
                }
            }
        }
    }

    /// Describes the current byte for error messages, e.g. `')'` or `end of input`.
    pub fn describe_next(&self) -> String {
        match self.peek() {
            Some(byte) => format!("'{}'", char::from(byte)),
            None => "end of input".to_string(),
        }
    }

    /// Creates an error of the given kind at the cursor, quoting the upcoming text.
    pub fn error(&self, kind: ParsingErrorType) -> ParsingError {
        let rest = self.rest();
        let context = &rest[..rest.len().min(ERROR_CONTEXT_LEN)];
        ParsingError::new(kind, self.pos, String::from_utf8_lossy(context).into_owned())
    }
}
