//! Newick format parser and writer for phylogenetic trees.
//!
//! This module provides [`NewickParser`] to parse Newick format strings
//! into [`PhylogeneticTree`]s. The parser uses a
//! [`TreeBuilder`](crate::model::TreeBuilder) internally and passes leaf
//! labels through a [`LabelResolver`](crate::model::LabelResolver), so it is
//! used both for plain Newick text and for tree strings inside Nexus files.
//!
//! # Quick API
//! * [`parse_str`] - parses all trees in a string and returns the first
//! * [`to_newick`] / [`write_newick_file`] - serialise trees again
//!
//! # Format
//! * `tree ::= '(' vertex (',' vertex)* ')' [label] [branch_length] ';'`
//! * `vertex ::= leaf | '(' vertex (',' vertex)* ')' [label] [branch_length]`
//! * `leaf ::= label [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Whitespace can occur between elements,
//!   just not within an unquoted label or a branch length
//! * Labels may be quoted with single quotes, doubling internal quotes
//! * Comments are square brackets and can occur anywhere where whitespace is allowed
//!
//! Extended Newick annotations such as `[&height=0.5]` are comments to this
//! parser; [`strip_annotations`](crate::parser::preprocess::strip_annotations)
//! removes them up front when reading whole files.

mod parser;
pub mod writer;

pub use self::parser::NewickParser;
pub use self::writer::{to_newick, write_newick_file};

use crate::model::PhylogeneticTree;
use crate::parser::byte_parser::ByteParser;
use crate::parser::{ParsingError, ParsingErrorType};

/// Parses a Newick string and returns its first tree.
///
/// The whole string must consist of valid Newick trees; if it holds more
/// than one, the rest are parsed (and thus validated) but discarded.
///
/// # Errors
/// Returns a [ParsingError] if the string is not valid Newick, or
/// [`ParsingErrorType::NoTreeFound`] if it contains no tree at all.
///
/// # Example
/// ```
/// use rtt_reconcile::newick::parse_str;
///
/// let tree = parse_str("(Fratercula_cirrhata,(Fratercula_arctica,Fratercula_corniculata));").unwrap();
/// assert_eq!(tree.num_leaves(), 3);
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<PhylogeneticTree, ParsingError> {
    let byte_parser = ByteParser::for_str(newick.as_ref());
    let trees = NewickParser::new().parse_all(byte_parser)?;
    if trees.len() > 1 {
        log::debug!("Newick input holds {} trees, using the first", trees.len());
    }

    trees
        .into_iter()
        .next()
        .ok_or_else(|| ParsingError::without_context(ParsingErrorType::NoTreeFound))
}
