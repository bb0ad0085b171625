//! Utility functions for label escaping in tree notation.
//!
//! Labels are opaque strings once parsed. When writing them back, any label
//! holding a structural character, whitespace the parser would skip, or a
//! single quote is wrapped in single quotes with inner quotes doubled.

/// Characters that cannot appear in an unquoted label.
const SPECIAL_CHARACTERS: &[char] = &[' ', '\n', '(', ')', ',', ';', '\''];

/// Checks if a label must be quoted to survive a write/parse round trip.
///
/// # Examples
/// ```
/// # use cactusgraph::parser::utils::needs_quoting;
/// assert!(!needs_quoting("NET12"));
/// assert!(!needs_quoting("ro:ot"));
/// assert!(needs_quoting("node 1"));
/// assert!(needs_quoting("node,3"));
/// assert!(needs_quoting("node'4"));
/// ```
pub fn needs_quoting(label: &str) -> bool {
    label.contains(SPECIAL_CHARACTERS)
}

/// Escapes a label for tree notation.
///
/// # Examples
/// ```
/// # use cactusgraph::parser::utils::escape_label;
/// assert_eq!(escape_label("CHAIN3"), "CHAIN3");
/// assert_eq!(escape_label("node;2"), "'node;2'");
/// assert_eq!(escape_label("Baillon's Crake"), "'Baillon''s Crake'");
/// ```
pub fn escape_label(label: &str) -> String {
    if needs_quoting(label) {
        // Double inner single quotes and wrap in single quotes
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}
