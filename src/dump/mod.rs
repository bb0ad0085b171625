//! Cactus dump reading.
//!
//! A dump is line-oriented, tab-separated text. Each line starts with a
//! record tag (`C`, `G`, `M`, `P` or `STEP`); see [DumpParser] for the
//! fields of each record kind.
//!
//! # Quick API
//! * [`CactusDump`] via `str::parse` or [CactusDump::from_lines] - parse,
//!   annotate, build and lay out in one go
//!
//! # Full API
//! * [DumpParser] - configurable parser producing [DumpRecords]
//! * [DumpSegments] - lazy iterator over `STEP`-separated dump segments

pub mod cactus_dump;
pub mod parser;
pub mod records;

pub use cactus_dump::CactusDump;
pub use parser::{DumpParser, DumpSegments, SegmentFormat};
pub use records::DumpRecords;
