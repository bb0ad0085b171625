//! Construction of a [PinchGraph] from raw pinch blocks.

use crate::error::CactusError;
use crate::model::{
    Adjacency, AdjacencyIndex, BlockIndex, EndIndex, Orientation, PinchBlock, PinchGraph,
    PinchSegment, SegmentRef, Thread,
};
use std::collections::HashMap;

// =#========================================================================#=
// PINCH GRAPH BUILDER
// =#========================================================================$=
/// Turns the blocks of a dump into a connected [PinchGraph].
///
/// Steps:
/// 1. index blocks by name (names must be unique),
/// 2. create both ends of every block,
/// 3. group segments by thread, in encounter order,
/// 4. materialise one [Adjacency] per segment with a right-adjacent block,
///    matched against the nearest segment of the same thread in that block,
/// 5. number adjacencies joining the same unordered pair of blocks.
///
/// Left-adjacencies mirror right-adjacencies and are not materialised.
///
/// # Example
/// ```
/// use cactusgraph::dump::DumpParser;
/// use cactusgraph::pinch::PinchGraphBuilder;
///
/// let dump = "G\tb1\tt1\t0\t10\tb2\t(nil)\t+\nG\tb2\tt1\t15\t30\t(nil)\tb1\t+\n";
/// let records = DumpParser::new().parse_str(dump).unwrap();
/// let graph = PinchGraphBuilder::new().build(records.blocks).unwrap();
///
/// assert_eq!(graph.adjacencies().len(), 1);
/// assert_eq!(graph.adjacencies()[0].length(), 5);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct PinchGraphBuilder;

impl PinchGraphBuilder {
    pub fn new() -> Self {
        PinchGraphBuilder
    }

    /// Builds the graph.
    ///
    /// # Errors
    /// * `DuplicateBlock` - two blocks share a name
    /// * `DanglingAdjacency` - a segment names a right-adjacent block that
    ///   does not exist, or that holds no segment of the same thread
    pub fn build(&self, blocks: Vec<PinchBlock>) -> Result<PinchGraph, CactusError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("build_pinch_graph", blocks = blocks.len()).entered();

        let mut lookup = HashMap::with_capacity(blocks.len());
        for (index, block) in blocks.iter().enumerate() {
            if lookup.insert(block.name.clone(), index).is_some() {
                return Err(CactusError::duplicate_block(&block.name));
            }
        }

        let mut graph = PinchGraph::with_blocks(blocks, lookup);
        let threads = group_threads(graph.blocks());
        graph.set_threads(threads);

        let adjacencies = right_adjacencies(&graph)?;
        for (from_block, adjacency) in adjacencies {
            graph.push_adjacency(from_block, adjacency);
        }
        assign_multiplicities(&mut graph);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            adjacencies = graph.adjacencies().len(),
            threads = graph.threads().len(),
            "pinch graph built"
        );

        Ok(graph)
    }
}

/// Groups all segments by thread id, threads and segments in encounter order.
fn group_threads(blocks: &[PinchBlock]) -> Vec<Thread> {
    let mut threads: Vec<Thread> = Vec::new();
    let mut thread_index: HashMap<&str, usize> = HashMap::new();

    for (block, pinch_block) in blocks.iter().enumerate() {
        for (segment, pinch_segment) in pinch_block.segments.iter().enumerate() {
            let index = *thread_index
                .entry(pinch_segment.thread_id.as_str())
                .or_insert_with(|| {
                    threads.push(Thread {
                        id: pinch_segment.thread_id.clone(),
                        segments: Vec::new(),
                    });
                    threads.len() - 1
                });
            threads[index].segments.push(SegmentRef { block, segment });
        }
    }

    threads
}

/// End a segment leaves its block through, walking its thread forward.
fn exit_end(graph: &PinchGraph, block: BlockIndex, segment: &PinchSegment) -> EndIndex {
    match segment.orientation {
        Orientation::Forward => graph.end1(block),
        Orientation::Reverse => graph.end0(block),
    }
}

/// End a segment enters its block through, walking its thread forward.
fn entry_end(graph: &PinchGraph, block: BlockIndex, segment: &PinchSegment) -> EndIndex {
    match segment.orientation {
        Orientation::Forward => graph.end0(block),
        Orientation::Reverse => graph.end1(block),
    }
}

/// Creates one adjacency per segment with a right-adjacent block, paired
/// with the block it leaves.
fn right_adjacencies(graph: &PinchGraph) -> Result<Vec<(BlockIndex, Adjacency)>, CactusError> {
    let mut adjacencies = Vec::new();

    for (block, pinch_block) in graph.blocks().iter().enumerate() {
        for (segment_index, segment) in pinch_block.segments.iter().enumerate() {
            let Some(adjacent_name) = segment.right_adjacent_block.as_deref() else {
                continue;
            };

            let adjacent = graph.block_index(adjacent_name).ok_or_else(|| {
                CactusError::dangling_adjacency(format!(
                    "block '{}' names unknown right-adjacent block '{adjacent_name}'",
                    pinch_block.name
                ))
            })?;

            let matched = graph
                .block(adjacent)
                .segments
                .iter()
                .enumerate()
                .filter(|(other_index, other)| {
                    other.thread_id == segment.thread_id
                        && !(adjacent == block && *other_index == segment_index)
                })
                .min_by_key(|(_, other)| segment.distance_to(other))
                .map(|(_, other)| other)
                .ok_or_else(|| {
                    CactusError::dangling_adjacency(format!(
                        "block '{adjacent_name}' holds no segment of thread '{}' adjacent to block '{}'",
                        segment.thread_id, pinch_block.name
                    ))
                })?;

            let length = matched.start.checked_sub(segment.end).ok_or_else(|| {
                CactusError::malformed_record(format!(
                    "gap from block '{}' to block '{adjacent_name}' on thread '{}' is out of range",
                    pinch_block.name, segment.thread_id
                ))
            })?;

            let adjacency = Adjacency::new(
                segment.thread_id.clone(),
                exit_end(graph, block, segment),
                entry_end(graph, adjacent, matched),
                length,
                segment.right_adj_component.clone(),
            );
            adjacencies.push((block, adjacency));
        }
    }

    Ok(adjacencies)
}

/// Sets multiplicity and number of each adjacency within its unordered
/// block pair; numbers follow adjacency order.
fn assign_multiplicities(graph: &mut PinchGraph) {
    let mut groups: HashMap<(BlockIndex, BlockIndex), Vec<AdjacencyIndex>> = HashMap::new();
    for (index, adjacency) in graph.adjacencies().iter().enumerate() {
        let source = graph.end(adjacency.source()).block();
        let target = graph.end(adjacency.target()).block();
        let key = (source.min(target), source.max(target));
        groups.entry(key).or_default().push(index);
    }

    let adjacencies = graph.adjacencies_mut();
    for group in groups.values() {
        for (adj_number, &index) in group.iter().enumerate() {
            adjacencies[index].set_multiplicity(group.len(), adj_number);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CactusErrorType;

    fn segment(thread: &str, start: i64, end: i64, right: Option<&str>, orientation: Orientation) -> PinchSegment {
        PinchSegment {
            thread_id: thread.to_string(),
            start,
            end,
            right_adjacent_block: right.map(str::to_string),
            left_adjacent_block: None,
            orientation,
            left_adj_component: None,
            right_adj_component: None,
        }
    }

    #[test]
    fn test_nearest_segment_of_same_thread_is_matched() {
        let blocks = vec![
            PinchBlock::new("a", vec![segment("t1", 100, 110, Some("b"), Orientation::Forward)]),
            PinchBlock::new(
                "b",
                vec![
                    segment("t1", 0, 10, None, Orientation::Forward),
                    segment("t2", 112, 120, None, Orientation::Forward),
                    segment("t1", 115, 125, None, Orientation::Reverse),
                ],
            ),
        ];
        let graph = PinchGraphBuilder::new().build(blocks).unwrap();
        let adjacency = &graph.adjacencies()[0];
        assert_eq!(adjacency.length(), 5);
        assert_eq!(adjacency.source(), graph.end1(0));
        // Matched segment is reverse, so the thread enters at end1
        assert_eq!(adjacency.target(), graph.end1(1));
    }

    #[test]
    fn test_self_adjacency_skips_own_segment() {
        let blocks = vec![PinchBlock::new(
            "rep",
            vec![
                segment("t1", 0, 10, Some("rep"), Orientation::Forward),
                segment("t1", 20, 30, None, Orientation::Forward),
            ],
        )];
        let graph = PinchGraphBuilder::new().build(blocks).unwrap();
        let adjacency = &graph.adjacencies()[0];
        assert_eq!(adjacency.length(), 10);
        assert_eq!(adjacency.source(), graph.end1(0));
        assert_eq!(adjacency.target(), graph.end0(0));
    }

    #[test]
    fn test_reverse_segment_leaves_through_end0() {
        let blocks = vec![
            PinchBlock::new(
                "a",
                vec![
                    segment("t1", 0, 10, Some("b"), Orientation::Reverse),
                    segment("t2", 0, 10, Some("c"), Orientation::Reverse),
                ],
            ),
            PinchBlock::new("b", vec![segment("t1", 20, 30, None, Orientation::Forward)]),
            PinchBlock::new("c", vec![segment("t2", 20, 30, None, Orientation::Reverse)]),
        ];
        let graph = PinchGraphBuilder::new().build(blocks).unwrap();

        let to_forward = &graph.adjacencies()[0];
        assert_eq!(to_forward.source(), graph.end0(0));
        assert_eq!(to_forward.target(), graph.end0(1));

        let to_reverse = &graph.adjacencies()[1];
        assert_eq!(to_reverse.source(), graph.end0(0));
        assert_eq!(to_reverse.target(), graph.end1(2));
    }

    #[test]
    fn test_out_of_range_gap_is_error() {
        let blocks = vec![
            PinchBlock::new("a", vec![segment("t1", 0, i64::MIN, Some("b"), Orientation::Forward)]),
            PinchBlock::new("b", vec![segment("t1", 10, 20, None, Orientation::Forward)]),
        ];
        let err = PinchGraphBuilder::new().build(blocks).unwrap_err();
        assert!(matches!(err.kind(), CactusErrorType::MalformedRecord(_)));
        assert!(err.to_string().contains("'a'"));
    }

    #[test]
    fn test_duplicate_block_names() {
        let blocks = vec![PinchBlock::new("a", vec![]), PinchBlock::new("a", vec![])];
        let err = PinchGraphBuilder::new().build(blocks).unwrap_err();
        assert_eq!(err.kind(), &CactusErrorType::DuplicateBlock("a".to_string()));
    }

    #[test]
    fn test_adjacent_block_without_thread_segment() {
        let blocks = vec![
            PinchBlock::new("a", vec![segment("t1", 0, 10, Some("b"), Orientation::Forward)]),
            PinchBlock::new("b", vec![segment("t2", 12, 20, None, Orientation::Forward)]),
        ];
        let err = PinchGraphBuilder::new().build(blocks).unwrap_err();
        assert!(matches!(err.kind(), CactusErrorType::DanglingAdjacency(_)));
    }

    #[test]
    fn test_threads_in_encounter_order() {
        let blocks = vec![
            PinchBlock::new(
                "a",
                vec![
                    segment("t2", 0, 5, None, Orientation::Forward),
                    segment("t1", 0, 5, None, Orientation::Forward),
                ],
            ),
            PinchBlock::new("b", vec![segment("t2", 10, 15, None, Orientation::Forward)]),
        ];
        let graph = PinchGraphBuilder::new().build(blocks).unwrap();
        let ids: Vec<&str> = graph.thread_ids().collect();
        assert_eq!(ids, vec!["t2", "t1"]);
        assert_eq!(
            graph.threads()[0].segments,
            vec![SegmentRef { block: 0, segment: 0 }, SegmentRef { block: 1, segment: 0 }]
        );
    }
}
