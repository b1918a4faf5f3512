//! Validates nearest-neighbor matching against brute force and the engine protocol

use emojitile::MosaicError;
use emojitile::engine::MatchEngine;
use emojitile::palette::{CandidateColor, FlatTree, build_tree, flatten_tree};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn candidate(identifier: &str, avg: [f32; 3]) -> CandidateColor {
    CandidateColor {
        identifier: identifier.to_string(),
        avg,
    }
}

fn load_engine(flat: &FlatTree) -> MatchEngine {
    let mut engine = MatchEngine::new();
    engine.declare_node_capacity(flat.nodes.len());
    for (index, record) in flat.nodes.iter().enumerate() {
        engine
            .write_node(
                index,
                record.avg[0],
                record.avg[1],
                record.avg[2],
                record.left,
                record.right,
                record.axis,
                record.payload_id,
            )
            .unwrap();
    }
    engine.set_root(flat.root_index).unwrap();
    engine
}

fn match_colors(flat: &FlatTree, queries: &[[f32; 3]]) -> Vec<i32> {
    let mut engine = load_engine(flat);
    engine.declare_tile_capacity(queries.len());
    for (index, query) in queries.iter().enumerate() {
        engine
            .write_tile_color(index, query[0], query[1], query[2])
            .unwrap();
    }
    engine.run_queries().unwrap();
    engine.results().unwrap().to_vec()
}

fn squared_distance(a: [f32; 3], b: [f32; 3]) -> f32 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    dr * dr + dg * dg + db * db
}

#[test]
fn test_two_candidate_scenario() {
    let flat = flatten_tree(
        build_tree(vec![
            candidate("a", [255.0, 0.0, 0.0]),
            candidate("b", [0.0, 0.0, 255.0]),
        ])
        .as_ref(),
    );

    let results = match_colors(&flat, &[[250.0, 10.0, 10.0], [10.0, 10.0, 250.0]]);

    let names: Vec<&str> = results
        .iter()
        .map(|&id| flat.identifiers[id as usize].as_str())
        .collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_empty_tree_returns_sentinel() {
    let flat = flatten_tree(None);
    let results = match_colors(&flat, &[[100.0, 100.0, 100.0], [0.0, 0.0, 0.0]]);
    assert_eq!(results, vec![-1, -1]);
}

#[test]
fn test_exact_tie_resolves_to_first_visited() {
    // Both candidates sit 20 units from the query along R. The builder
    // makes the upper median (140) the root, which the search visits
    // first; strict improvement means the lower point cannot displace it.
    let flat = flatten_tree(
        build_tree(vec![
            candidate("low", [100.0, 0.0, 0.0]),
            candidate("high", [140.0, 0.0, 0.0]),
        ])
        .as_ref(),
    );

    let results = match_colors(&flat, &[[120.0, 0.0, 0.0]]);

    assert_eq!(flat.identifiers[results[0] as usize], "high");
}

#[test]
fn test_single_candidate_always_matches() {
    let flat = flatten_tree(build_tree(vec![candidate("only", [10.0, 20.0, 30.0])]).as_ref());

    let results = match_colors(&flat, &[[0.0, 0.0, 0.0], [255.0, 255.0, 255.0]]);
    assert_eq!(results, vec![0, 0]);
}

#[test]
fn test_matches_brute_force_on_random_sets() {
    let mut rng = StdRng::seed_from_u64(42);

    for &point_count in &[10_usize, 100, 1_000, 10_000] {
        let candidates: Vec<CandidateColor> = (0..point_count)
            .map(|i| {
                candidate(
                    &format!("candidate_{i}"),
                    [
                        rng.random_range(0.0_f32..=255.0),
                        rng.random_range(0.0_f32..=255.0),
                        rng.random_range(0.0_f32..=255.0),
                    ],
                )
            })
            .collect();

        let query_count = if point_count >= 10_000 { 50 } else { 200 };
        let queries: Vec<[f32; 3]> = (0..query_count)
            .map(|_| {
                [
                    rng.random_range(0.0_f32..=255.0),
                    rng.random_range(0.0_f32..=255.0),
                    rng.random_range(0.0_f32..=255.0),
                ]
            })
            .collect();

        let flat = flatten_tree(build_tree(candidates.clone()).as_ref());
        let results = match_colors(&flat, &queries);

        for (query, &payload_id) in queries.iter().zip(&results) {
            let returned = flat.identifiers[payload_id as usize].as_str();
            let returned_distance = candidates
                .iter()
                .find(|c| c.identifier == returned)
                .map(|c| squared_distance(c.avg, *query))
                .unwrap();

            let best_distance = candidates
                .iter()
                .map(|c| squared_distance(c.avg, *query))
                .fold(f32::INFINITY, f32::min);

            assert_eq!(
                returned_distance, best_distance,
                "engine match is not the nearest candidate for {query:?} over {point_count} points"
            );
        }
    }
}

#[test]
fn test_node_write_beyond_capacity_fails() {
    let mut engine = MatchEngine::new();
    engine.declare_node_capacity(2);

    let result = engine.write_node(2, 0.0, 0.0, 0.0, -1, -1, 0, -1);
    match result {
        Err(MosaicError::Capacity {
            what,
            index,
            capacity,
        }) => {
            assert_eq!(what, "node");
            assert_eq!(index, 2);
            assert_eq!(capacity, 2);
        }
        _ => unreachable!("Expected Capacity error type"),
    }
}

#[test]
fn test_tile_write_beyond_capacity_fails() {
    let mut engine = MatchEngine::new();
    engine.declare_tile_capacity(4);

    let result = engine.write_tile_color(4, 0.0, 0.0, 0.0);
    assert!(matches!(
        result,
        Err(MosaicError::Capacity { what: "tile", .. })
    ));
}

#[test]
fn test_root_rejected_while_nodes_unwritten() {
    let mut engine = MatchEngine::new();
    engine.declare_node_capacity(3);
    engine.write_node(0, 1.0, 2.0, 3.0, -1, -1, 0, 0).unwrap();

    let result = engine.set_root(0);
    assert!(matches!(result, Err(MosaicError::EngineState { .. })));
}

#[test]
fn test_query_rejected_before_root_set() {
    let mut engine = MatchEngine::new();
    engine.declare_node_capacity(1);
    engine.write_node(0, 1.0, 2.0, 3.0, -1, -1, 0, 0).unwrap();
    engine.declare_tile_capacity(1);
    engine.write_tile_color(0, 1.0, 2.0, 3.0).unwrap();

    let result = engine.run_queries();
    assert!(matches!(result, Err(MosaicError::EngineState { .. })));
}

#[test]
fn test_query_rejected_with_unwritten_tiles() {
    let flat = flatten_tree(build_tree(vec![candidate("a", [1.0, 2.0, 3.0])]).as_ref());
    let mut engine = load_engine(&flat);

    engine.declare_tile_capacity(2);
    engine.write_tile_color(0, 1.0, 2.0, 3.0).unwrap();

    let result = engine.run_queries();
    assert!(matches!(result, Err(MosaicError::EngineState { .. })));
}

#[test]
fn test_results_unreadable_before_processing() {
    let flat = flatten_tree(build_tree(vec![candidate("a", [1.0, 2.0, 3.0])]).as_ref());
    let mut engine = load_engine(&flat);

    engine.declare_tile_capacity(1);
    engine.write_tile_color(0, 1.0, 2.0, 3.0).unwrap();

    assert!(engine.read_result(0).is_err());

    engine.run_queries().unwrap();
    assert_eq!(engine.read_result(0).unwrap(), 0);
}

#[test]
fn test_redeclare_replaces_loaded_tree() {
    let red = flatten_tree(build_tree(vec![candidate("red", [255.0, 0.0, 0.0])]).as_ref());
    let blue = flatten_tree(build_tree(vec![candidate("blue", [0.0, 0.0, 255.0])]).as_ref());

    let mut engine = load_engine(&red);
    engine.declare_tile_capacity(1);
    engine.write_tile_color(0, 200.0, 0.0, 0.0).unwrap();
    engine.run_queries().unwrap();
    let first = engine.read_result(0).unwrap();
    assert_eq!(red.identifiers[first as usize], "red");

    // Redeclaring node storage invalidates the processed batch entirely
    engine.declare_node_capacity(blue.nodes.len());
    assert!(engine.read_result(0).is_err());

    for (index, record) in blue.nodes.iter().enumerate() {
        engine
            .write_node(
                index,
                record.avg[0],
                record.avg[1],
                record.avg[2],
                record.left,
                record.right,
                record.axis,
                record.payload_id,
            )
            .unwrap();
    }
    engine.set_root(blue.root_index).unwrap();

    engine.declare_tile_capacity(1);
    engine.write_tile_color(0, 200.0, 0.0, 0.0).unwrap();
    engine.run_queries().unwrap();
    let second = engine.read_result(0).unwrap();
    assert_eq!(blue.identifiers[second as usize], "blue");
}

#[test]
fn test_duplicate_colors_preserved_as_nodes() {
    let flat = flatten_tree(
        build_tree(vec![
            candidate("first", [50.0, 50.0, 50.0]),
            candidate("second", [50.0, 50.0, 50.0]),
        ])
        .as_ref(),
    );

    assert_eq!(flat.nodes.len(), 2);

    let results = match_colors(&flat, &[[50.0, 50.0, 50.0]]);
    let name = flat.identifiers[results[0] as usize].as_str();
    assert!(name == "first" || name == "second");
}
