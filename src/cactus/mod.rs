//! Cactus tree handling: typed annotation of dump trees and the seam to an
//! external tree layout.

pub mod annotator;
pub mod tree_layout;

pub use annotator::{CactusTreeAnnotator, annotate, annotate_all};
pub use tree_layout::{TreeLayout, TreePlacement, place_forest};
