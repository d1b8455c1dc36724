//! Error type of the Newick and Nexus readers.
//!
//! A [ParsingError] pairs a [ParsingErrorType] with the byte offset at which
//! the reader gave up and a short excerpt of the text that follows it.

use std::error::Error;
use std::fmt;

/// What went wrong while reading tree text.
#[derive(thiserror::Error, PartialEq, Debug, Clone)]
pub enum ParsingErrorType {
    #[error("cannot read {0}")]
    IoError(String),
    #[error("unexpected end of input")]
    UnexpectedEOF,
    #[error("missing #NEXUS header")]
    MissingNexusHeader,
    #[error("malformed Nexus block: {0}")]
    InvalidBlock(String),
    #[error("invalid TAXA block: {0}")]
    InvalidTaxaBlock(String),
    #[error("invalid TREES block: {0}")]
    InvalidTreesBlock(String),
    #[error("invalid TRANSLATE command: {0}")]
    InvalidTranslateCommand(String),
    #[error("unclosed comment")]
    UnclosedComment,
    #[error("unclosed quoted label")]
    UnclosedQuote,
    #[error("invalid Newick string: {0}")]
    InvalidNewickString(String),
    #[error("unresolved label: {0}")]
    UnresolvedLabel(String),
    #[error("invalid tree: {0}")]
    InvalidTreeStructure(String),
    #[error("no tree found in input")]
    NoTreeFound,
}

/// Error raised while reading a tree, with its position in the text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsingError {
    kind: ParsingErrorType,
    position: usize,
    context: String,
}

impl ParsingError {
    /// Creates an error at byte offset `position`; `context` is the text following it.
    pub fn new(kind: ParsingErrorType, position: usize, context: String) -> Self {
        Self {
            kind,
            position,
            context,
        }
    }

    /// Creates an error that does not refer to a position, e.g. for I/O failures.
    pub fn without_context(kind: ParsingErrorType) -> Self {
        Self::new(kind, 0, String::new())
    }

    pub fn kind(&self) -> &ParsingErrorType {
        &self.kind
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the excerpt of text following the error position (may be empty).
    pub fn context(&self) -> &str {
        &self.context
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let ParsingErrorType::IoError(_) | ParsingErrorType::NoTreeFound = self.kind {
            return write!(f, "{}", self.kind);
        }

        write!(f, "{} at byte {}", self.kind, self.position)?;
        if !self.context.is_empty() {
            write!(f, " near {:?}", self.context)?;
        }
        Ok(())
    }
}

impl Error for ParsingError {}
