//! NEXUS format reader for phylogenetic trees.
//!
//! This module provides [`NexusParser`], which reads the trees of a Nexus
//! file, and the quick API [`parse_str`] returning its first tree.
//!
//! # Format
//! A NEXUS file typically contains:
//! - An optional TAXA block defining the taxon labels
//! - A TREES block containing one or more phylogenetic trees
//! - An optional TRANSLATE command mapping short keys to full taxon labels
//!
//! Tip labels in the Newick strings are resolved in this order: `TRANSLATE`
//! key, 1-based index into the TAXA labels, label itself (which must then
//! appear in the TAXA block, if there is one).
//!
//! A label with spaces must be enclosed in single quotes, and an apostrophe
//! within a quoted label is doubled, e.g. `'Wilson''s storm-petrel'`.

mod defs;
mod parser;

pub use self::defs::NexusBlock;
pub use self::parser::NexusParser;

use crate::model::PhylogeneticTree;
use crate::parser::byte_parser::ByteParser;
use crate::parser::{ParsingError, ParsingErrorType};

/// Parses a Nexus text and returns the first tree of its TREES block.
///
/// # Errors
/// Returns a [ParsingError] if the text is not valid Nexus, or
/// [`ParsingErrorType::NoTreeFound`] if the TREES block is empty.
pub fn parse_str<S: AsRef<str>>(nexus: S) -> Result<PhylogeneticTree, ParsingError> {
    let trees = NexusParser::new(ByteParser::for_str(nexus.as_ref())).parse_all()?;
    if trees.len() > 1 {
        log::debug!("Nexus TREES block holds {} trees, using the first", trees.len());
    }

    trees
        .into_iter()
        .next()
        .ok_or_else(|| ParsingError::without_context(ParsingErrorType::NoTreeFound))
}
