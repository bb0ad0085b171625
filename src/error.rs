//! Error types for dump parsing, cactus annotation, pinch graph building
//! and layout.
//!
//! This module provides [CactusError] and [CactusErrorType] for representing
//! and reporting errors of the whole pipeline.

use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use std::error::Error;
use std::fmt;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// CACTUS ERROR TYPE
// =#========================================================================€=
/// Error types that can occur while processing a cactus dump.
#[derive(PartialEq, Debug, Clone)]
pub enum CactusErrorType {
    /// Tree string never reached its terminating `;`
    UnterminatedTree,
    /// Dump record with wrong field count or unparsable field
    MalformedRecord(String),
    /// Tree node name lacking the expected `NET`/`CHAIN`/`BLOCK` prefix
    UnrecognizedNodeKind(String),
    /// Tree shape that cannot be read as NET/CHAIN nodes joined by BLOCKs
    InvalidTreeStructure(String),
    /// Adjacency pointing to a block (or thread segment) that does not exist
    DanglingAdjacency(String),
    /// Two blocks with the same name
    DuplicateBlock(String),
    /// Geometry requested for an adjacency whose ends have no coordinates
    UnpositionedAdjacency(String),
}

// =#========================================================================#=
// CACTUS ERROR
// =#========================================================================$=
/// Error with contextual information (line, position and surrounding text).
#[derive(Debug)]
pub struct CactusError {
    kind: CactusErrorType,
    line: Option<usize>,
    position: usize,
    context: String,
}

impl CactusError {
    /// Create a CactusError from an error type and parser state
    pub fn from_parser<S: ByteSource>(kind: CactusErrorType, parser: &mut ByteParser<S>) -> Self {
        Self {
            kind,
            line: None,
            position: parser.position(),
            context: parser.get_context_as_string(DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Create a CactusError without parser context
    pub fn without_context(kind: CactusErrorType) -> Self {
        Self {
            kind,
            line: None,
            position: 0,
            context: String::new(),
        }
    }

    /// Convenience constructor for UnterminatedTree
    pub fn unterminated_tree<S: ByteSource>(parser: &mut ByteParser<S>) -> Self {
        Self::from_parser(CactusErrorType::UnterminatedTree, parser)
    }

    /// Convenience constructor for MalformedRecord
    pub fn malformed_record(msg: String) -> Self {
        Self::without_context(CactusErrorType::MalformedRecord(msg))
    }

    /// Convenience constructor for UnrecognizedNodeKind
    pub fn unrecognized_node_kind(name: &str) -> Self {
        Self::without_context(CactusErrorType::UnrecognizedNodeKind(name.to_string()))
    }

    /// Convenience constructor for InvalidTreeStructure
    pub fn invalid_tree_structure(msg: String) -> Self {
        Self::without_context(CactusErrorType::InvalidTreeStructure(msg))
    }

    /// Convenience constructor for DanglingAdjacency
    pub fn dangling_adjacency(msg: String) -> Self {
        Self::without_context(CactusErrorType::DanglingAdjacency(msg))
    }

    /// Convenience constructor for DuplicateBlock
    pub fn duplicate_block(name: &str) -> Self {
        Self::without_context(CactusErrorType::DuplicateBlock(name.to_string()))
    }

    /// Convenience constructor for UnpositionedAdjacency
    pub fn unpositioned_adjacency(msg: String) -> Self {
        Self::without_context(CactusErrorType::UnpositionedAdjacency(msg))
    }

    /// Attaches the (1-based) dump line number and the line itself as context.
    ///
    /// Context already recorded by the tree parser is kept.
    pub fn at_line(mut self, line_number: usize, line: &str) -> Self {
        self.line = Some(line_number);
        if self.context.is_empty() {
            self.context = line.chars().take(DEFAULT_CONTEXT_LENGTH).collect();
        }
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> &CactusErrorType {
        &self.kind
    }

    /// Get the dump line the error occurred on, if known
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// Get the position where the error occurred
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get the context snippet
    pub fn context(&self) -> &str {
        &self.context
    }
}

impl fmt::Display for CactusError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Main error message
        match &self.kind {
            CactusErrorType::UnterminatedTree => write!(f, "Unterminated tree string, missing ';'")?,
            CactusErrorType::MalformedRecord(msg) => write!(f, "Malformed dump record - {msg}")?,
            CactusErrorType::UnrecognizedNodeKind(name) => {
                write!(f, "Unrecognized node kind for node '{name}'")?
            }
            CactusErrorType::InvalidTreeStructure(msg) => write!(f, "Invalid tree structure - {msg}")?,
            CactusErrorType::DanglingAdjacency(msg) => write!(f, "Dangling adjacency - {msg}")?,
            CactusErrorType::DuplicateBlock(name) => write!(f, "Duplicate block '{name}'")?,
            CactusErrorType::UnpositionedAdjacency(msg) => {
                write!(f, "Adjacency has no valid coordinates - {msg}")?
            }
        }

        // Additional location information
        if let Some(line) = self.line {
            write!(f, " on line {line}")?;
        }
        if self.position > 0 {
            write!(f, " at position {}", self.position)?;
        }

        // Additional context if available
        if !self.context.is_empty() {
            write!(f, "\n  Context: {}", self.context)?;
        }

        Ok(())
    }
}

impl Error for CactusError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_line_and_context() {
        let err = CactusError::malformed_record("expected 8 fields per segment".to_string())
            .at_line(3, "G\tblock1\tthread");
        let msg = err.to_string();
        assert!(msg.contains("Malformed dump record"));
        assert!(msg.contains("on line 3"));
        assert!(msg.contains("G\tblock1"));
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_at_line_keeps_parser_context() {
        let mut parser = ByteParser::for_str("(a,b");
        parser.next_byte();
        let err = CactusError::unterminated_tree(&mut parser).at_line(7, "C\t(a,b");
        assert_eq!(err.kind(), &CactusErrorType::UnterminatedTree);
        assert_eq!(err.position(), 1);
        assert_eq!(err.context(), "a,b");
        assert_eq!(err.line(), Some(7));

        let mut parser = ByteParser::for_str("(a,b");
        while parser.next_byte().is_some() {}
        let err = CactusError::unterminated_tree(&mut parser).at_line(7, "C\t(a,b");
        assert_eq!(err.context(), "C\t(a,b");
    }
}
