//! Raw pinch graph records as read from `G` and `P` dump lines.

use std::fmt;

/// Literal marking an absent adjacent block or component.
pub const NIL_MARKER: &str = "(nil)";

// =#========================================================================#=
// ORIENTATION
// =#========================================================================$=
/// Orientation of a segment relative to its block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Orientation {
    /// `+`
    Forward,
    /// `-`
    Reverse,
}

impl Orientation {
    /// Parses the exact literals `+` and `-`.
    pub fn from_symbol(symbol: &str) -> Option<Orientation> {
        match symbol {
            "+" => Some(Orientation::Forward),
            "-" => Some(Orientation::Reverse),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Orientation::Forward => '+',
            Orientation::Reverse => '-',
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// =#========================================================================#=
// PINCH SEGMENT
// =#========================================================================$=
/// A thread's stretch through one block.
///
/// Adjacent block and component fields are `None` where the dump has the
/// nil marker (or, for components, the older format omits them).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PinchSegment {
    pub thread_id: String,
    pub start: i64,
    pub end: i64,
    pub right_adjacent_block: Option<String>,
    pub left_adjacent_block: Option<String>,
    pub orientation: Orientation,
    pub left_adj_component: Option<String>,
    pub right_adj_component: Option<String>,
}

impl PinchSegment {
    /// Number of positions covered by this segment.
    pub fn span(&self) -> u64 {
        self.end.abs_diff(self.start)
    }

    /// Gap measure used to match this segment against a segment it points to:
    /// `min(|other.start - self.end|, |other.end - self.start|)`.
    pub fn distance_to(&self, other: &PinchSegment) -> u64 {
        other
            .start
            .abs_diff(self.end)
            .min(other.end.abs_diff(self.start))
    }
}

/// Turns the nil marker into `None`.
pub(crate) fn non_nil(field: &str) -> Option<String> {
    if field == NIL_MARKER {
        None
    } else {
        Some(field.to_string())
    }
}

// =#========================================================================#=
// PINCH BLOCK
// =#========================================================================$=
/// An aligned block and the segments of all threads running through it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PinchBlock {
    pub name: String,
    pub segments: Vec<PinchSegment>,
}

impl PinchBlock {
    pub fn new<S: Into<String>>(name: S, segments: Vec<PinchSegment>) -> Self {
        PinchBlock {
            name: name.into(),
            segments,
        }
    }
}

// =#========================================================================#=
// PINCH LINK (legacy)
// =#========================================================================$=
/// Direct block-to-block edge from a `P` record of older dumps.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PinchLink {
    pub source: String,
    pub target: String,
    pub name: String,
    pub degree: f64,
    pub length: f64,
}
