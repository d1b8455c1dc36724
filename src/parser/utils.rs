//! Utility functions for label escaping in Newick output.
//!
//! Labels that contain Newick punctuation or whitespace are wrapped in
//! single quotes, with internal single quotes doubled, so that the written
//! tree re-parses to exactly the same tip names.

/// Characters that force a label to be quoted
const SPECIAL_CHARS: &[char] = &[
    ' ', ',', ';', '\t', '\n', '\r', '(', ')', ':', '[', ']', '\'',
];

/// Checks if a label can be written without quotes.
///
/// # Examples
/// ```
/// # use rtt_reconcile::parser::utils::needs_quotes;
/// assert!(!needs_quotes("hCoV-19/England/MILK-9E05B3/2020"));
/// assert!(needs_quotes("Australasian Swamphen"));
/// assert!(needs_quotes("Baillon's_Crake"));
/// assert!(needs_quotes(""));
/// ```
pub fn needs_quotes(label: &str) -> bool {
    label.is_empty() || label.contains(SPECIAL_CHARS)
}

/// Escapes a label for use in a Newick string.
///
/// # Examples
/// ```
/// # use rtt_reconcile::parser::utils::escape_label;
/// assert_eq!(escape_label("Pukeko"), "Pukeko");
/// assert_eq!(escape_label("Pu[ke]ko"), "'Pu[ke]ko'");
/// assert_eq!(escape_label("Australasian Swamphen"), "'Australasian Swamphen'");
/// assert_eq!(escape_label("Baillon's Crake"), "'Baillon''s Crake'");
/// ```
pub fn escape_label(label: &str) -> String {
    if needs_quotes(label) {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}
