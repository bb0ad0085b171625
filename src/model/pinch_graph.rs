//! Pinch graph: blocks, block ends, adjacencies and threads.
//!
//! Uses the arena pattern throughout. Block `b` owns the ends `2b`
//! ([EndSide::Zero]) and `2b + 1` ([EndSide::One]); both are created with the
//! block and never move to another block.

use crate::model::point::Point;
use crate::model::segment::{PinchBlock, PinchSegment};
use std::collections::HashMap;

/// Index of a block in a [PinchGraph].
pub type BlockIndex = usize;
/// Index of a block end in a [PinchGraph].
pub type EndIndex = usize;
/// Index of an adjacency in a [PinchGraph].
pub type AdjacencyIndex = usize;

// =#========================================================================#=
// BLOCK END
// =#========================================================================$=
/// Which of the two ends of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EndSide {
    /// `end0`, the left end of the block's default axis
    Zero,
    /// `end1`, the right end of the block's default axis
    One,
}

/// One end of a block, carrying the coordinates assigned by layout.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BlockEnd {
    block: BlockIndex,
    side: EndSide,
    position: Point,
}

impl BlockEnd {
    pub fn block(&self) -> BlockIndex {
        self.block
    }

    pub fn side(&self) -> EndSide {
        self.side
    }

    /// Layout position; [Point::UNSET] until layout ran.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }
}

// =#========================================================================#=
// ADJACENCY
// =#========================================================================$=
/// A thread traversing from one block's end to another block's end.
///
/// `length` is `matched.start - segment.end` and may be zero or negative for
/// abutting or overlapping segments.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Adjacency {
    thread_id: String,
    source: EndIndex,
    target: EndIndex,
    length: i64,
    component: Option<String>,
    multiplicity: usize,
    adj_number: usize,
}

impl Adjacency {
    pub(crate) fn new(
        thread_id: String,
        source: EndIndex,
        target: EndIndex,
        length: i64,
        component: Option<String>,
    ) -> Self {
        Adjacency {
            thread_id,
            source,
            target,
            length,
            component,
            multiplicity: 1,
            adj_number: 0,
        }
    }

    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    pub fn source(&self) -> EndIndex {
        self.source
    }

    pub fn target(&self) -> EndIndex {
        self.target
    }

    pub fn length(&self) -> i64 {
        self.length
    }

    /// Component id of the adjacency, if the dump provides one.
    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }

    /// Number of adjacencies joining the same (unordered) pair of blocks.
    pub fn multiplicity(&self) -> usize {
        self.multiplicity
    }

    /// Position of this adjacency within its block pair, in `0..multiplicity`.
    pub fn adj_number(&self) -> usize {
        self.adj_number
    }

    pub(crate) fn set_multiplicity(&mut self, multiplicity: usize, adj_number: usize) {
        self.multiplicity = multiplicity;
        self.adj_number = adj_number;
    }
}

// =#========================================================================#=
// THREAD
// =#========================================================================$=
/// Reference to a segment: block index plus position in the block's segment list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SegmentRef {
    pub block: BlockIndex,
    pub segment: usize,
}

/// A sequence and its segments, in dump encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Thread {
    pub id: String,
    pub segments: Vec<SegmentRef>,
}

// =#========================================================================#=
// PINCH GRAPH
// =#========================================================================$=
/// Blocks, their ends, right-adjacencies and threads of one dump.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PinchGraph {
    blocks: Vec<PinchBlock>,
    ends: Vec<BlockEnd>,
    adjacencies: Vec<Adjacency>,
    threads: Vec<Thread>,
    /// Outgoing adjacencies of each block, in segment order
    block_adjacencies: Vec<Vec<AdjacencyIndex>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    lookup: HashMap<String, BlockIndex>,
}

// ============================================================================
// Construction (crate)
// ============================================================================
impl PinchGraph {
    /// Creates a graph holding the given blocks and both ends of each block,
    /// without adjacencies or threads yet.
    pub(crate) fn with_blocks(blocks: Vec<PinchBlock>, lookup: HashMap<String, BlockIndex>) -> Self {
        let ends = (0..blocks.len())
            .flat_map(|block| {
                [EndSide::Zero, EndSide::One].map(|side| BlockEnd {
                    block,
                    side,
                    position: Point::UNSET,
                })
            })
            .collect();
        let block_adjacencies = vec![Vec::new(); blocks.len()];

        PinchGraph {
            blocks,
            ends,
            adjacencies: Vec::new(),
            threads: Vec::new(),
            block_adjacencies,
            lookup,
        }
    }

    pub(crate) fn push_adjacency(&mut self, from_block: BlockIndex, adjacency: Adjacency) -> AdjacencyIndex {
        let index = self.adjacencies.len();
        self.adjacencies.push(adjacency);
        self.block_adjacencies[from_block].push(index);
        index
    }

    pub(crate) fn set_threads(&mut self, threads: Vec<Thread>) {
        self.threads = threads;
    }

    pub(crate) fn adjacencies_mut(&mut self) -> &mut [Adjacency] {
        &mut self.adjacencies
    }

    pub(crate) fn set_end_position(&mut self, end: EndIndex, position: Point) {
        self.ends[end].position = position;
    }
}

// ============================================================================
// Accessors (pub)
// ============================================================================
impl PinchGraph {
    pub fn blocks(&self) -> &[PinchBlock] {
        &self.blocks
    }

    pub fn block(&self, index: BlockIndex) -> &PinchBlock {
        &self.blocks[index]
    }

    /// Index of the block with the given name.
    pub fn block_index(&self, name: &str) -> Option<BlockIndex> {
        self.lookup.get(name).copied()
    }

    pub fn ends(&self) -> &[BlockEnd] {
        &self.ends
    }

    pub fn end(&self, index: EndIndex) -> &BlockEnd {
        &self.ends[index]
    }

    /// `end0` of a block.
    pub fn end0(&self, block: BlockIndex) -> EndIndex {
        2 * block
    }

    /// `end1` of a block.
    pub fn end1(&self, block: BlockIndex) -> EndIndex {
        2 * block + 1
    }

    /// Default directed axis `(source, target) = (end0, end1)` of a block.
    pub fn axis(&self, block: BlockIndex) -> (EndIndex, EndIndex) {
        (self.end0(block), self.end1(block))
    }

    pub fn adjacencies(&self) -> &[Adjacency] {
        &self.adjacencies
    }

    pub fn adjacency(&self, index: AdjacencyIndex) -> &Adjacency {
        &self.adjacencies[index]
    }

    /// Adjacencies leaving the given block, in segment order.
    pub fn block_adjacencies(&self, block: BlockIndex) -> &[AdjacencyIndex] {
        &self.block_adjacencies[block]
    }

    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    /// Thread ids in dump encounter order.
    pub fn thread_ids(&self) -> impl Iterator<Item = &str> {
        self.threads.iter().map(|thread| thread.id.as_str())
    }

    /// Resolves a segment reference.
    pub fn segment(&self, segment: SegmentRef) -> &PinchSegment {
        &self.blocks[segment.block].segments[segment.segment]
    }

    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Returns whether every block end has finite coordinates.
    pub fn is_positioned(&self) -> bool {
        self.ends.iter().all(|end| end.position.is_positioned())
    }
}
