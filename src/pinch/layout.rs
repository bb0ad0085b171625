//! Greedy per-thread layout of a pinch graph.
//!
//! Threads are laid out one after another, each on its own row. Within a
//! thread, blocks are drawn left to right by repeatedly taking the queued
//! block reached through the shortest adjacency: a nearest-neighbour
//! expansion driven by a stack kept sorted by adjacency length.

use crate::model::{BlockIndex, PinchGraph, Point};

// =#========================================================================#=
// LAYOUT CONFIG
// =#========================================================================$=
/// Constants of the pinch graph layout and curve geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Base horizontal extent of a block, added to its first segment's span
    pub block_width: f64,
    /// Horizontal gap after each block; twice this separates thread rows
    pub separation: f64,
    /// Vertical shift per entry left on the stack when a block is drawn
    pub fan_step: f64,
    /// Control point distance of the first self-loop; grows per adj number
    pub self_loop_radius: f64,
    /// Vertical distance between parallel curves of one block pair
    pub curve_spacing: f64,
    /// Horizontal span beyond which a curve gets an extra lift
    pub far_span: f64,
    /// Extra lift per unit of the whole horizontal span, applied once the
    /// span exceeds `far_span`
    pub far_span_factor: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            block_width: 20.0,
            separation: 20.0,
            fan_step: 10.0,
            self_loop_radius: 15.0,
            curve_spacing: 10.0,
            far_span: 200.0,
            far_span_factor: 0.1,
        }
    }
}

// =#========================================================================#=
// LAYOUT REPORT
// =#========================================================================$=
/// Outcome of a layout run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LayoutReport {
    /// Blocks in the order they were drawn; each block appears once
    pub drawn: Vec<BlockIndex>,
    /// Number of thread rows used (blocks without segments add one more)
    pub rows: usize,
}

/// Queued block, keyed by the length of the adjacency that reached it.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    length_key: i64,
    block: BlockIndex,
}

// =#========================================================================#=
// GREEDY LAYOUT
// =#========================================================================$=
/// Layout engine writing `x`/`y` onto every block end of a [PinchGraph].
///
/// Deterministic: structurally equal graphs get equal coordinates. Visual
/// quality is a heuristic, not an optimum.
///
/// # Example
/// ```
/// use cactusgraph::dump::DumpParser;
/// use cactusgraph::pinch::{GreedyLayout, PinchGraphBuilder};
///
/// let dump = "G\tb1\tt1\t0\t10\tb2\t(nil)\t+\nG\tb2\tt1\t15\t30\t(nil)\tb1\t+\n";
/// let records = DumpParser::new().parse_str(dump).unwrap();
/// let mut graph = PinchGraphBuilder::new().build(records.blocks).unwrap();
/// let report = GreedyLayout::new().layout(&mut graph);
///
/// assert_eq!(report.drawn, vec![0, 1]);
/// assert_eq!(graph.end(graph.end1(0)).x(), 30.0);
/// assert_eq!(graph.end(graph.end0(1)).x(), 50.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyLayout {
    config: LayoutConfig,
}

impl GreedyLayout {
    /// Creates a layout engine with default constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the layout constants.
    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Assigns coordinates to every block end of `graph`.
    ///
    /// Every block is drawn exactly once, by the first thread reaching it.
    /// A thread whose earliest block is already drawn restarts from its
    /// earliest undrawn segment; blocks without segments are drawn on a
    /// final row.
    pub fn layout(&self, graph: &mut PinchGraph) -> LayoutReport {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("greedy_layout", blocks = graph.num_blocks()).entered();

        let mut state = LayoutState::new(&self.config, graph);

        for thread in graph.threads() {
            let mut seeds = thread.segments.clone();
            seeds.sort_by_key(|&segment| graph.segment(segment).start);

            state.cur_x = 0.0;
            for seed in seeds {
                state.expand_from(graph, seed.block);
            }

            #[cfg(feature = "tracing")]
            tracing::trace!(thread = %thread.id, drawn = state.report.drawn.len(), "thread laid out");

            state.next_row();
        }

        if state.report.drawn.len() < graph.num_blocks() {
            state.cur_x = 0.0;
            for block in 0..graph.num_blocks() {
                state.expand_from(graph, block);
            }
            state.next_row();
        }

        let LayoutState {
            positions, report, ..
        } = state;
        for (end, position) in positions.into_iter().enumerate() {
            graph.set_end_position(end, position);
        }

        report
    }
}

/// Mutable bookkeeping of one layout run.
struct LayoutState<'c> {
    config: &'c LayoutConfig,
    positions: Vec<Point>,
    drawn: Vec<bool>,
    queued: Vec<bool>,
    cur_x: f64,
    cur_y: f64,
    report: LayoutReport,
}

impl<'c> LayoutState<'c> {
    fn new(config: &'c LayoutConfig, graph: &PinchGraph) -> Self {
        LayoutState {
            config,
            positions: vec![Point::UNSET; graph.ends().len()],
            drawn: vec![false; graph.num_blocks()],
            queued: vec![false; graph.num_blocks()],
            cur_x: 0.0,
            cur_y: 0.0,
            report: LayoutReport::default(),
        }
    }

    /// Draws `seed` (unless drawn already) and everything greedily reachable.
    fn expand_from(&mut self, graph: &PinchGraph, seed: BlockIndex) {
        if self.drawn[seed] {
            return;
        }

        let mut stack = vec![Candidate {
            length_key: 0,
            block: seed,
        }];
        self.queued[seed] = true;

        while let Some(candidate) = stack.pop() {
            self.queued[candidate.block] = false;
            if self.drawn[candidate.block] {
                continue;
            }

            self.draw_block(graph, candidate.block, stack.len());

            for &adjacency in graph.block_adjacencies(candidate.block) {
                let adjacency = graph.adjacency(adjacency);
                let block = graph.end(adjacency.target()).block();
                if self.drawn[block] || self.queued[block] {
                    continue;
                }

                // Sorted by length descending, so the shortest is popped next
                let length_key = adjacency.length();
                let at = stack.partition_point(|queued| queued.length_key >= length_key);
                stack.insert(at, Candidate { length_key, block });
                self.queued[block] = true;
            }
        }
    }

    /// Places both ends of `block` and advances the horizontal cursor.
    fn draw_block(&mut self, graph: &PinchGraph, block: BlockIndex, stack_depth: usize) {
        let span = graph
            .block(block)
            .segments
            .first()
            .map_or(0, |segment| segment.span());
        let y = self.cur_y - self.config.fan_step * stack_depth as f64;

        self.positions[graph.end0(block)] = Point::new(self.cur_x, y);
        self.cur_x += self.config.block_width + span as f64;
        self.positions[graph.end1(block)] = Point::new(self.cur_x, y);
        self.cur_x += self.config.separation;

        self.drawn[block] = true;
        self.report.drawn.push(block);
    }

    fn next_row(&mut self) {
        self.cur_y += 2.0 * self.config.separation;
        self.report.rows += 1;
    }
}
