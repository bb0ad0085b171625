use cactusgraph::dump::DumpParser;
use cactusgraph::error::CactusErrorType;
use cactusgraph::model::{EndSide, PinchGraph};
use cactusgraph::pinch::PinchGraphBuilder;

fn build(dump: &str) -> PinchGraph {
    let records = DumpParser::new().parse_str(dump).unwrap();
    PinchGraphBuilder::new().build(records.blocks).unwrap()
}

// Three threads run a -> b, a fourth runs b -> a
const PARALLEL: &str = "\
G\ta\tt1\t0\t10\tb\t(nil)\t+\tt2\t0\t10\tb\t(nil)\t+\tt3\t0\t10\tb\t(nil)\t+\tt4\t50\t60\t(nil)\tb\t+
G\tb\tt1\t20\t30\t(nil)\ta\t+\tt2\t20\t30\t(nil)\ta\t+\tt3\t20\t30\t(nil)\ta\t+\tt4\t30\t40\ta\t(nil)\t+
G\tc\tt5\t0\t5\t(nil)\t(nil)\t-
";

// --- TESTS BLOCK ENDS ---
#[test]
fn test_every_block_owns_two_distinct_ends() {
    let graph = build(PARALLEL);
    for block in 0..graph.num_blocks() {
        let (end0, end1) = graph.axis(block);
        assert_ne!(end0, end1);
        assert_eq!(graph.end(end0).block(), block);
        assert_eq!(graph.end(end1).block(), block);
        assert_eq!(graph.end(end0).side(), EndSide::Zero);
        assert_eq!(graph.end(end1).side(), EndSide::One);
    }
    assert_eq!(graph.ends().len(), 2 * graph.num_blocks());
    assert!(!graph.is_positioned());
}

// --- TESTS ADJACENCIES ---
#[test]
fn test_parallel_adjacencies_are_numbered() {
    let graph = build(PARALLEL);
    assert_eq!(graph.adjacencies().len(), 4);

    let mut numbers: Vec<usize> = graph.adjacencies().iter().map(|adj| adj.adj_number()).collect();
    numbers.sort_unstable();
    assert_eq!(numbers, vec![0, 1, 2, 3]);
    assert!(graph.adjacencies().iter().all(|adj| adj.multiplicity() == 4));
}

#[test]
fn test_adjacency_fields() {
    let graph = build(PARALLEL);
    let a = graph.block_index("a").unwrap();
    let b = graph.block_index("b").unwrap();

    let first = graph.adjacency(graph.block_adjacencies(a)[0]);
    assert_eq!(first.thread_id(), "t1");
    assert_eq!(first.length(), 10);
    assert_eq!(first.source(), graph.end1(a));
    assert_eq!(first.target(), graph.end0(b));

    // t4 leaves b at 40 and enters a at 50
    let back = graph.adjacency(graph.block_adjacencies(b)[0]);
    assert_eq!(back.thread_id(), "t4");
    assert_eq!(back.length(), 10);
    assert_eq!(back.target(), graph.end0(a));
    assert!(graph.block_adjacencies(graph.block_index("c").unwrap()).is_empty());
}

#[test]
fn test_component_and_non_positive_length() {
    let graph = build(
        "G\ta\tt1\t0\t10\tb\t(nil)\t+\t(nil)\tcomp7\nG\tb\tt1\t8\t20\t(nil)\ta\t+\tcomp7\t(nil)\n",
    );
    let adjacency = &graph.adjacencies()[0];
    assert_eq!(adjacency.component(), Some("comp7"));
    assert_eq!(adjacency.length(), -2);
    assert_eq!(adjacency.multiplicity(), 1);
    assert_eq!(adjacency.adj_number(), 0);
}

#[test]
fn test_threads_collect_segments() {
    let graph = build(PARALLEL);
    let ids: Vec<&str> = graph.thread_ids().collect();
    assert_eq!(ids, vec!["t1", "t2", "t3", "t4", "t5"]);

    let t4 = &graph.threads()[3];
    let starts: Vec<i64> = t4.segments.iter().map(|&s| graph.segment(s).start).collect();
    assert_eq!(starts, vec![50, 30]);
}

// --- TESTS ERRORS ---
#[test]
fn test_dangling_adjacency() {
    let records = DumpParser::new()
        .parse_str("G\ta\tt1\t0\t10\tghost\t(nil)\t+\n")
        .unwrap();
    let err = PinchGraphBuilder::new().build(records.blocks).unwrap_err();
    assert!(matches!(err.kind(), CactusErrorType::DanglingAdjacency(_)));
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn test_duplicate_block() {
    let records = DumpParser::new()
        .parse_str("G\ta\tt1\t0\t10\t(nil)\t(nil)\t+\nG\ta\tt2\t0\t10\t(nil)\t(nil)\t+\n")
        .unwrap();
    let err = PinchGraphBuilder::new().build(records.blocks).unwrap_err();
    assert_eq!(err.kind(), &CactusErrorType::DuplicateBlock("a".to_string()));
}

#[test]
fn test_extreme_coordinates_do_not_panic() {
    let dump = "G\ta\tt1\t0\t-9223372036854775808\tb\t(nil)\t+\nG\tb\tt1\t10\t20\t(nil)\ta\t+\n";
    let err = cactusgraph::parse_dump_str(dump).unwrap_err();
    assert!(matches!(err.kind(), CactusErrorType::MalformedRecord(_)));
}
