//! Low-level byte-by-byte parser for ASCII text.
//!
//! This module provides [ByteParser] for reading text-based formats with
//! support for peeking, consuming and quote-aware label reading. Used as the
//! foundation of the tree notation parser.

use crate::parser::byte_source::{ByteSource, InMemoryByteSource};

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser for ASCII text with support for peeking and consuming.
///
/// Multi-byte UTF-8 sequences pass through untouched: all structural bytes
/// of the tree notation are ASCII, so continuation bytes never match them.
///
/// # Example
/// ```
/// use cactusgraph::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("'a''b'c;");
/// let mut label = Vec::new();
/// assert!(parser.read_quoted_into(&mut label));
/// assert_eq!(label, b"a'b");
/// assert_eq!(parser.peek(), Some(b'c'));
/// ```
pub struct ByteParser<S: ByteSource> {
    source: S,
}

impl<'a> ByteParser<InMemoryByteSource<'a>> {
    /// Creates a new `ByteParser` borrowing the bytes of a string.
    ///
    /// # Arguments
    /// * `input` - The string to parse
    pub fn for_str(input: &'a str) -> Self {
        Self::new(InMemoryByteSource::from_slice(input.as_bytes()))
    }
}

impl<S: ByteSource> ByteParser<S> {
    /// Creates a new `ByteParser` from a byte source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Peeks at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    #[inline(always)]
    pub fn peek(&mut self) -> Option<u8> {
        self.source.peek()
    }

    /// Gets the current byte and advances the position (consumes it).
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        self.source.next_byte()
    }

    /// Consumes the current byte if it matches the target byte exactly.
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek() == Some(ch) {
            self.next_byte();
            true
        } else {
            false
        }
    }

    /// Returns the current parser position in the input.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Returns a string from up to `k` bytes from the current position for error context.
    ///
    /// Invalid UTF-8 sequences are replaced with the Unicode replacement character.
    pub fn get_context_as_string(&mut self, k: usize) -> String {
        let context_bytes = self.source.get_context(k);
        String::from_utf8_lossy(&context_bytes).into_owned()
    }

    /// Reads a quoted label enclosed in single quotes, appending its
    /// content to `label`.
    ///
    /// Expects the parser at the opening quote. Single quotes within the
    /// label are escaped by doubling them (e.g., `'Wilson''s'` becomes
    /// `Wilson's`); every other byte, delimiters and whitespace included,
    /// is taken literally.
    ///
    /// # Returns
    /// `true` if the closing quote was found, `false` if EOF was reached first
    pub fn read_quoted_into(&mut self, label: &mut Vec<u8>) -> bool {
        if !self.consume_if(b'\'') {
            return false;
        }

        while let Some(b) = self.next_byte() {
            if b == b'\'' {
                // Check for escaped quote (two single quotes in a row)
                if self.consume_if(b'\'') {
                    label.push(b'\'');
                } else {
                    return true;
                }
            } else {
                label.push(b);
            }
        }

        false
    }
}
