//! Basic low-level byte parser functionality.
//!
//! Provides [ByteParser] over a [ByteSource](byte_source::ByteSource), plus
//! label escaping helpers shared by the tree notation reader and writer.

pub mod byte_parser;
pub mod byte_source;
pub mod utils;

pub use byte_parser::ByteParser;
