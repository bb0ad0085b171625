use cactusgraph::dump::DumpParser;
use cactusgraph::model::{PinchGraph, Point};
use cactusgraph::parse_dump_str;
use cactusgraph::pinch::{GreedyLayout, LayoutConfig, PinchGraphBuilder, adjacency_curve, curves};

fn build(dump: &str) -> PinchGraph {
    let records = DumpParser::new().parse_str(dump).unwrap();
    PinchGraphBuilder::new().build(records.blocks).unwrap()
}

// t1: a(0..10) -> b(15..25) -> c(40..60); t2 revisits b, then d
const CHAIN: &str = "\
G\ta\tt1\t0\t10\tb\t(nil)\t+
G\tb\tt1\t15\t25\tc\ta\t+\tt2\t0\t10\td\t(nil)\t+
G\tc\tt1\t40\t60\t(nil)\tb\t+
G\td\tt2\t12\t14\t(nil)\tb\t+
";

fn position(graph: &PinchGraph, block: &str, end1: bool) -> Point {
    let block = graph.block_index(block).unwrap();
    let end = if end1 { graph.end1(block) } else { graph.end0(block) };
    graph.end(end).position()
}

// --- TESTS GREEDY LAYOUT ---
#[test]
fn test_shortest_gap_drawn_next() {
    let mut graph = build(CHAIN);
    let report = GreedyLayout::new().layout(&mut graph);

    // b queues c (gap 15) and d (gap 2); d is the shorter and comes first,
    // raised by one fan step since c is still waiting on the stack
    assert_eq!(report.drawn, vec![0, 1, 3, 2]);
    assert_eq!(position(&graph, "a", false), Point::new(0.0, 0.0));
    assert_eq!(position(&graph, "a", true), Point::new(30.0, 0.0));
    assert_eq!(position(&graph, "b", false), Point::new(50.0, 0.0));
    assert_eq!(position(&graph, "b", true), Point::new(80.0, 0.0));
    assert_eq!(position(&graph, "d", false), Point::new(100.0, -10.0));
    assert_eq!(position(&graph, "d", true), Point::new(122.0, -10.0));
    assert_eq!(position(&graph, "c", false), Point::new(142.0, 0.0));
    assert_eq!(position(&graph, "c", true), Point::new(182.0, 0.0));
    assert!(graph.is_positioned());
}

#[test]
fn test_every_block_drawn_once() {
    let mut graph = build(CHAIN);
    let report = GreedyLayout::new().layout(&mut graph);

    let mut drawn = report.drawn.clone();
    drawn.sort_unstable();
    assert_eq!(drawn, vec![0, 1, 2, 3]);
    assert_eq!(report.rows, 2);
}

#[test]
fn test_layout_is_deterministic() {
    let mut first = build(CHAIN);
    let mut second = build(CHAIN);
    GreedyLayout::new().layout(&mut first);
    GreedyLayout::new().layout(&mut second);
    assert_eq!(first.ends(), second.ends());
}

#[test]
fn test_second_thread_starts_new_row() {
    let mut graph = build(
        "G\ta\tt1\t0\t10\t(nil)\t(nil)\t+\nG\tb\tt2\t0\t10\t(nil)\t(nil)\t+\n",
    );
    GreedyLayout::new().layout(&mut graph);
    assert_eq!(position(&graph, "a", false), Point::new(0.0, 0.0));
    assert_eq!(position(&graph, "b", false), Point::new(0.0, 40.0));
}

#[test]
fn test_config_changes_spacing() {
    let mut graph = build(
        "G\ta\tt1\t0\t10\t(nil)\t(nil)\t+\nG\tb\tt2\t0\t10\t(nil)\t(nil)\t+\n",
    );
    let config = LayoutConfig {
        separation: 5.0,
        ..LayoutConfig::default()
    };
    GreedyLayout::new().with_config(config).layout(&mut graph);
    assert_eq!(position(&graph, "b", false), Point::new(0.0, 10.0));
}

// --- TESTS CURVES ---
#[test]
fn test_curves_after_full_pipeline() {
    let dump = parse_dump_str(CHAIN).unwrap();
    let graph = &dump.pinch_graph;
    let all = curves(graph, &LayoutConfig::default()).unwrap();

    assert_eq!(all.len(), graph.adjacencies().len());
    for (curve, adjacency) in all.iter().zip(graph.adjacencies()) {
        assert_eq!(curve.start, graph.end(adjacency.source()).position());
        assert_eq!(curve.end, graph.end(adjacency.target()).position());
    }
}

#[test]
fn test_self_loops_grow_with_adj_number() {
    // Both segments of t1 leave "rep" at end1 and re-enter it at end0;
    // with a zero-width block both ends coincide
    let mut graph = build(
        "G\trep\tt1\t0\t0\trep\t(nil)\t+\tt1\t0\t0\trep\t(nil)\t+\n",
    );
    let config = LayoutConfig {
        block_width: 0.0,
        ..LayoutConfig::default()
    };
    GreedyLayout::new().with_config(config).layout(&mut graph);

    let first = adjacency_curve(&graph, graph.adjacency(0), &config).unwrap();
    let second = adjacency_curve(&graph, graph.adjacency(1), &config).unwrap();
    assert_eq!(first.start, first.end);
    assert_eq!(first.control1, Point::new(-15.0, -15.0));
    assert_eq!(second.control2, Point::new(30.0, -30.0));
}
