//! Text preprocessing applied to tree files before tokenizing.
//!
//! Tree files written by TreeTime, BEAST or FigTree carry inline metadata
//! such as `[&date=2021.53,confidence=0.9]` or the `[&R]` rooting marker.
//! These are removed wholesale before parsing, and the remaining text is
//! classified as Nexus or plain Newick.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Number of leading characters searched for the `#NEXUS` marker
pub const FORMAT_SNIFF_CHARS: usize = 200;

static ANNOTATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[&[^\]]*\]").expect("annotation pattern is valid"));

/// Tree exchange format of a tree file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeFormat {
    /// `#NEXUS` file with a TREES block
    Nexus,
    /// One or more semicolon-terminated Newick strings
    Newick,
}

/// Removes every `[&...]` annotation block from the given text.
///
/// Plain `[...]` comments are left in place; the tokenizer skips those.
///
/// # Example
/// ```
/// use rtt_reconcile::parser::preprocess::strip_annotations;
///
/// let text = "((A[&date=2021.5]:1,B:1)[&support=0.9]:0.5,C:2)[&R];";
/// assert_eq!(strip_annotations(text), "((A:1,B:1):0.5,C:2);");
/// ```
pub fn strip_annotations(text: &str) -> Cow<'_, str> {
    ANNOTATION_RE.replace_all(text, "")
}

/// Detects the format from a case-insensitive `#NEXUS` marker within the
/// first [FORMAT_SNIFF_CHARS] characters.
///
/// # Example
/// ```
/// use rtt_reconcile::parser::preprocess::{detect_format, TreeFormat};
///
/// assert_eq!(detect_format("#nexus\nbegin trees;"), TreeFormat::Nexus);
/// assert_eq!(detect_format("(A:1,B:2);"), TreeFormat::Newick);
/// ```
pub fn detect_format(text: &str) -> TreeFormat {
    let head: String = text.chars().take(FORMAT_SNIFF_CHARS).collect();
    if head.to_ascii_uppercase().contains("#NEXUS") {
        TreeFormat::Nexus
    } else {
        TreeFormat::Newick
    }
}
