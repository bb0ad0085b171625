//! Line-oriented parser for cactus dumps.
//!
//! This module provides the [DumpParser] struct, which reads tab-separated,
//! tag-prefixed dump lines into [DumpRecords], either eagerly or one
//! `STEP`-separated segment at a time via [DumpSegments].

use crate::dump::records::DumpRecords;
use crate::error::CactusError;
use crate::model::segment::non_nil;
use crate::model::{Orientation, PinchBlock, PinchLink, PinchSegment};
use crate::newick::TreeNotationParser;
use crate::parser::ByteParser;

/// Fields per segment tuple with component ids.
const EXTENDED_TUPLE_SIZE: usize = 8;
/// Fields per segment tuple of older dumps, without component ids.
const BASIC_TUPLE_SIZE: usize = 6;
/// Position of the orientation field within a segment tuple (both formats).
const ORIENTATION_FIELD: usize = 5;
/// Fields of a legacy `P` record after its tag.
const LINK_FIELDS: usize = 5;

// =#========================================================================#=
// SEGMENT FORMAT
// =#========================================================================$=
/// How the segment fields of a `G` record are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentFormat {
    /// 8 fields per segment: thread, start, end, right block, left block,
    /// orientation, left component, right component
    Extended,
    /// 6 fields per segment, without component ids
    Basic,
    /// Per record: [Extended](Self::Extended) if the fields fit it (count
    /// and orientation literals), else [Basic](Self::Basic)
    #[default]
    Detect,
}

/// What a single line asks the parser to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineOutcome {
    Continue,
    Step,
}

// =#========================================================================#=
// DUMP PARSER
// =#========================================================================$=
/// Parser (configuration) for cactus dump text.
///
/// Record kinds, by first field:
/// * `C <tree>` - net/chain tree in tree notation
/// * `G <block> <segment-tuple>*` - pinch block with its segments
/// * `M <owner> <member>*` - net/component membership
/// * `P <source> <target> <name> <degree> <length>` - legacy pinch edge
/// * `STEP` - end of the current dump segment
///
/// Lines with any other tag (including blank lines) are skipped.
///
/// # Configuration
/// * [`with_segment_format(format)`](Self::with_segment_format) - segment
///   tuple size of `G` records, detected per record by default
/// * [`with_stop_at_step(stop)`](Self::with_stop_at_step) - whether eager
///   parsing ends at the first `STEP` (default) or reads past it
///
/// # Example
/// ```
/// use cactusgraph::dump::DumpParser;
///
/// let dump = "C\t(CHAIN1)NET0;\nG\tb1\tt1\t0\t10\t(nil)\t(nil)\t+\nM\tNET0\tc1\n";
/// let records = DumpParser::new().parse_str(dump).unwrap();
/// assert_eq!(records.trees.len(), 1);
/// assert_eq!(records.blocks[0].segments[0].end, 10);
/// assert_eq!(records.net_of("c1"), Some("NET0"));
/// ```
#[derive(Debug)]
pub struct DumpParser {
    segment_format: SegmentFormat,
    stop_at_step: bool,
    tree_parser: TreeNotationParser,
}

impl Default for DumpParser {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl DumpParser {
    /// Creates a parser detecting the segment format and stopping at `STEP`.
    pub fn new() -> Self {
        DumpParser {
            segment_format: SegmentFormat::Detect,
            stop_at_step: true,
            tree_parser: TreeNotationParser::new(),
        }
    }

    /// Sets how segment fields of `G` records are grouped.
    pub fn with_segment_format(mut self, segment_format: SegmentFormat) -> Self {
        self.segment_format = segment_format;
        self
    }

    /// Sets whether eager parsing ends at the first `STEP` line.
    ///
    /// When `false`, `STEP` lines are skipped and all segments are merged.
    pub fn with_stop_at_step(mut self, stop_at_step: bool) -> Self {
        self.stop_at_step = stop_at_step;
        self
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl DumpParser {
    /// Parses dump text, split into lines on `\n` (a trailing `\r` on a
    /// line is dropped).
    pub fn parse_str(&mut self, text: &str) -> Result<DumpRecords, CactusError> {
        self.parse_lines(text.lines())
    }

    /// Parses a sequence of dump lines eagerly.
    ///
    /// # Returns
    /// * `Ok(DumpRecords)` - Records up to the first `STEP` (or end of input)
    /// * `Err(CactusError)` - First failing record, with its line number
    pub fn parse_lines<I, S>(&mut self, lines: I) -> Result<DumpRecords, CactusError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("parse_dump").entered();

        let mut records = DumpRecords::new();
        for (index, line) in lines.into_iter().enumerate() {
            let outcome = self.read_line(&mut records, index + 1, line.as_ref())?;
            if outcome == LineOutcome::Step && self.stop_at_step {
                break;
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            trees = records.trees.len(),
            blocks = records.blocks.len(),
            "dump parsed"
        );

        Ok(records)
    }

    /// Consumes the parser and returns an iterator over `STEP`-separated
    /// dump segments.
    ///
    /// Every segment ended by `STEP` is yielded, even if empty; the part
    /// after the last `STEP` is yielded only if it holds a non-blank line.
    pub fn segments<I, S>(self, lines: I) -> DumpSegments<I::IntoIter>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        DumpSegments {
            parser: self,
            lines: lines.into_iter(),
            line_number: 0,
            done: false,
        }
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl DumpParser {
    /// Reads one line into `records`, attaching the line number to errors.
    fn read_line(
        &mut self,
        records: &mut DumpRecords,
        line_number: usize,
        line: &str,
    ) -> Result<LineOutcome, CactusError> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        self.read_record(records, line)
            .map_err(|err| err.at_line(line_number, line))
    }

    fn read_record(&mut self, records: &mut DumpRecords, line: &str) -> Result<LineOutcome, CactusError> {
        let (tag, rest) = line.split_once('\t').unwrap_or((line, ""));

        match tag {
            "C" => {
                // The tree string is the rest of the line; quoted labels may hold tabs
                let mut byte_parser = ByteParser::for_str(rest);
                records.trees.push(self.tree_parser.parse(&mut byte_parser)?);
            }
            "G" => {
                let mut fields = rest.split('\t');
                let name = fields
                    .next()
                    .filter(|name| !name.is_empty())
                    .ok_or_else(|| CactusError::malformed_record("G record without block name".to_string()))?;
                let fields: Vec<&str> = fields.collect();
                let segments = self.read_segments(&fields)?;
                records.blocks.push(PinchBlock::new(name, segments));
            }
            "M" => {
                let mut fields = rest.split('\t');
                let owner = fields
                    .next()
                    .filter(|owner| !owner.is_empty())
                    .ok_or_else(|| CactusError::malformed_record("M record without owner id".to_string()))?;
                records.add_mapping(owner, fields.map(str::to_string).collect());
            }
            "P" => records.links.push(read_link(rest)?),
            "STEP" => return Ok(LineOutcome::Step),
            _ => {}
        }

        Ok(LineOutcome::Continue)
    }

    /// Groups the segment fields of a `G` record into segments.
    fn read_segments(&self, fields: &[&str]) -> Result<Vec<PinchSegment>, CactusError> {
        let tuple_size = match self.segment_format {
            SegmentFormat::Extended => EXTENDED_TUPLE_SIZE,
            SegmentFormat::Basic => BASIC_TUPLE_SIZE,
            SegmentFormat::Detect => detect_tuple_size(fields).ok_or_else(|| {
                CactusError::malformed_record(format!(
                    "{} segment fields fit neither {EXTENDED_TUPLE_SIZE}- nor {BASIC_TUPLE_SIZE}-field segments",
                    fields.len()
                ))
            })?,
        };

        if fields.len() % tuple_size != 0 {
            return Err(CactusError::malformed_record(format!(
                "{} segment fields is not a multiple of {tuple_size}",
                fields.len()
            )));
        }

        fields.chunks_exact(tuple_size).map(read_segment).collect()
    }
}

/// Picks the largest tuple size that divides the field count and puts a
/// valid orientation literal into every tuple.
fn detect_tuple_size(fields: &[&str]) -> Option<usize> {
    [EXTENDED_TUPLE_SIZE, BASIC_TUPLE_SIZE].into_iter().find(|&size| {
        fields.len() % size == 0
            && fields
                .chunks_exact(size)
                .all(|tuple| Orientation::from_symbol(tuple[ORIENTATION_FIELD]).is_some())
    })
}

/// Reads one segment tuple (6 or 8 fields).
fn read_segment(tuple: &[&str]) -> Result<PinchSegment, CactusError> {
    let orientation = Orientation::from_symbol(tuple[ORIENTATION_FIELD]).ok_or_else(|| {
        CactusError::malformed_record(format!(
            "Invalid orientation '{}', expected '+' or '-'",
            tuple[ORIENTATION_FIELD]
        ))
    })?;

    Ok(PinchSegment {
        thread_id: tuple[0].to_string(),
        start: parse_number(tuple[1], "segment start")?,
        end: parse_number(tuple[2], "segment end")?,
        right_adjacent_block: non_nil(tuple[3]),
        left_adjacent_block: non_nil(tuple[4]),
        orientation,
        left_adj_component: tuple.get(6).and_then(|field| non_nil(field)),
        right_adj_component: tuple.get(7).and_then(|field| non_nil(field)),
    })
}

/// Reads the fields of a legacy `P` record.
fn read_link(rest: &str) -> Result<PinchLink, CactusError> {
    let fields: Vec<&str> = rest.split('\t').collect();
    if fields.len() < LINK_FIELDS {
        return Err(CactusError::malformed_record(format!(
            "P record needs {LINK_FIELDS} fields but found {}",
            fields.len()
        )));
    }

    Ok(PinchLink {
        source: fields[0].to_string(),
        target: fields[1].to_string(),
        name: fields[2].to_string(),
        degree: parse_number(fields[3], "link degree")?,
        length: parse_number(fields[4], "link length")?,
    })
}

fn parse_number<T: std::str::FromStr>(field: &str, what: &str) -> Result<T, CactusError> {
    field
        .parse()
        .map_err(|_| CactusError::malformed_record(format!("Invalid {what}: '{field}'")))
}

// =#========================================================================#=
// DUMP SEGMENTS (lazy parser)
// =#========================================================================$=
/// Iterator over `STEP`-separated segments of a dump.
///
/// Created by [DumpParser::segments()]. Yields
/// `Result<DumpRecords, CactusError>` per segment and stops after the first
/// error.
pub struct DumpSegments<I> {
    parser: DumpParser,
    lines: I,
    line_number: usize,
    done: bool,
}

impl<I> DumpSegments<I> {
    /// Consumes the iterator and returns the underlying [DumpParser].
    pub fn into_parser(self) -> DumpParser {
        self.parser
    }
}

impl<I, S> Iterator for DumpSegments<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Result<DumpRecords, CactusError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut records = DumpRecords::new();
        let mut saw_content = false;
        for line in self.lines.by_ref() {
            self.line_number += 1;
            let line = line.as_ref();
            saw_content |= !line.trim().is_empty();

            match self.parser.read_line(&mut records, self.line_number, line) {
                Ok(LineOutcome::Step) => return Some(Ok(records)),
                Ok(LineOutcome::Continue) => {}
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }

        self.done = true;
        saw_content.then_some(Ok(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_prefers_extended() {
        // 24 fields divide by both 8 and 6
        let extended: Vec<&str> = ["t", "0", "1", "(nil)", "(nil)", "+", "c1", "c2"]
            .repeat(3);
        assert_eq!(detect_tuple_size(&extended), Some(EXTENDED_TUPLE_SIZE));

        let basic: Vec<&str> = ["t", "0", "1", "(nil)", "(nil)", "-"].repeat(4);
        assert_eq!(detect_tuple_size(&basic), Some(BASIC_TUPLE_SIZE));

        let broken: Vec<&str> = ["t", "0", "1", "(nil)", "(nil)", "?"].to_vec();
        assert_eq!(detect_tuple_size(&broken), None);
    }

    #[test]
    fn test_read_segment_nil_components() {
        let segment = read_segment(&["t1", "5", "9", "b2", "(nil)", "-", "(nil)", "comp3"]).unwrap();
        assert_eq!(segment.right_adjacent_block.as_deref(), Some("b2"));
        assert_eq!(segment.left_adjacent_block, None);
        assert_eq!(segment.orientation, Orientation::Reverse);
        assert_eq!(segment.left_adj_component, None);
        assert_eq!(segment.right_adj_component.as_deref(), Some("comp3"));
    }

    #[test]
    fn test_carriage_return_stripped() {
        let records = DumpParser::new()
            .parse_str("M\tNET1\tc1\r\nSTEP\r\nM\tNET2\tc2\r\n")
            .unwrap();
        assert_eq!(records.net_of("c1"), Some("NET1"));
        assert_eq!(records.net_of("c2"), None);
    }
}
