//! Full pipeline from dump text to a laid-out cactus graph.

use crate::cactus::CactusTreeAnnotator;
use crate::dump::parser::DumpParser;
use crate::dump::records::DumpRecords;
use crate::error::CactusError;
use crate::model::{Forest, PinchGraph};
use crate::pinch::{GreedyLayout, LayoutReport, PinchGraphBuilder};
use std::str::FromStr;

/// Result of running a dump through every stage.
///
/// * `forest` - all `C` trees, annotated into one forest
/// * `pinch_graph` - graph of the `G` blocks, with end coordinates set
/// * `records` - the remaining records (trees, links, membership maps);
///   its `blocks` are moved into `pinch_graph` and left empty
/// * `layout` - draw order reported by the layout run
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CactusDump {
    pub forest: Forest,
    pub pinch_graph: PinchGraph,
    pub records: DumpRecords,
    pub layout: LayoutReport,
}

impl CactusDump {
    /// Runs annotation, pinch graph building and layout on parsed records.
    pub fn from_records(mut records: DumpRecords, layout: &GreedyLayout) -> Result<Self, CactusError> {
        let mut annotator = CactusTreeAnnotator::new();
        for tree in &records.trees {
            annotator.annotate(tree)?;
        }

        let blocks = std::mem::take(&mut records.blocks);
        let mut pinch_graph = PinchGraphBuilder::new().build(blocks)?;
        let report = layout.layout(&mut pinch_graph);

        Ok(CactusDump {
            forest: annotator.into_forest(),
            pinch_graph,
            records,
            layout: report,
        })
    }

    /// Parses dump lines (up to the first `STEP`) with default settings
    /// and runs the full pipeline.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, CactusError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let records = DumpParser::new().parse_lines(lines)?;
        Self::from_records(records, &GreedyLayout::new())
    }

    /// Names to highlight together with `name`.
    ///
    /// See [DumpRecords::corresponding_names].
    pub fn corresponding_names<'a>(&'a self, name: &'a str) -> Vec<&'a str> {
        self.records.corresponding_names(name)
    }
}

impl FromStr for CactusDump {
    type Err = CactusError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::from_lines(text.lines())
    }
}
