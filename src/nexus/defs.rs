//! Nexus keywords and delimiters.

/// Marker opening every Nexus file, matched ignoring case
pub(crate) const NEXUS_HEADER: &str = "#NEXUS";

/// Bytes ending a command keyword or a `key=value` token
pub(crate) const WORD_DELIMITERS: &[u8] = b";=,[ \t\n\r";

/// Bytes ending an unquoted taxon label or `TRANSLATE` key
pub(crate) const LABEL_DELIMITERS: &[u8] = b";,[ \t\n\r";

/// Bytes ending the name in `TREE <name> = ...`
pub(crate) const TREE_NAME_DELIMITERS: &[u8] = b";=[ \t\n\r";

/// Kind of a `BEGIN <name>;` block.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum NexusBlock {
    Taxa,
    Trees,
    /// Any other block (DATA, CHARACTERS, ASSUMPTIONS, ...), which is skipped
    Other(String),
}

impl NexusBlock {
    /// Classifies a block name, ignoring case and surrounding blanks.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        if name.eq_ignore_ascii_case("taxa") {
            NexusBlock::Taxa
        } else if name.eq_ignore_ascii_case("trees") {
            NexusBlock::Trees
        } else {
            NexusBlock::Other(name.to_string())
        }
    }
}
