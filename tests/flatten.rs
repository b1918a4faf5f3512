//! Validates tree flattening, identifier de-duplication, and reconstruction

use emojitile::palette::{
    CandidateColor, ColorNode, FlatTree, NodeRecord, build_tree, flatten_tree, reconstruct_tree,
};

fn candidate(identifier: &str, avg: [f32; 3]) -> CandidateColor {
    CandidateColor {
        identifier: identifier.to_string(),
        avg,
    }
}

#[test]
fn test_round_trip_preserves_tree() {
    let tree = build_tree(vec![
        candidate("a", [10.0, 200.0, 30.0]),
        candidate("b", [240.0, 15.0, 100.0]),
        candidate("c", [60.0, 60.0, 60.0]),
        candidate("d", [128.0, 128.0, 128.0]),
        candidate("e", [0.0, 255.0, 255.0]),
    ]);

    let flat = flatten_tree(tree.as_ref());
    let rebuilt = reconstruct_tree(&flat).unwrap();

    assert_eq!(tree, rebuilt);
}

#[test]
fn test_identifier_table_deduplicates() {
    // Same sprite appearing under two colors shares one table entry
    let flat = flatten_tree(
        build_tree(vec![
            candidate("emoji_u2764.svg", [255.0, 0.0, 0.0]),
            candidate("emoji_u2764.svg", [200.0, 0.0, 0.0]),
            candidate("emoji_u1f499.svg", [0.0, 0.0, 255.0]),
        ])
        .as_ref(),
    );

    assert_eq!(flat.nodes.len(), 3);
    assert_eq!(flat.identifiers.len(), 2);

    let shared: Vec<i32> = flat
        .nodes
        .iter()
        .filter(|record| {
            flat.identifiers
                .get(record.payload_id as usize)
                .is_some_and(|id| id == "emoji_u2764.svg")
        })
        .map(|record| record.payload_id)
        .collect();
    assert_eq!(shared.len(), 2);
    assert_eq!(shared[0], shared[1]);
}

#[test]
fn test_children_indexed_before_parent() {
    let flat = flatten_tree(
        build_tree(
            (0..31)
                .map(|i| candidate(&format!("c{i}"), [i as f32 * 8.0, 0.0, 255.0 - i as f32]))
                .collect::<Vec<_>>(),
        )
        .as_ref(),
    );

    for (index, record) in flat.nodes.iter().enumerate() {
        if record.left >= 0 {
            assert!((record.left as usize) < index);
        }
        if record.right >= 0 {
            assert!((record.right as usize) < index);
        }
    }
    assert_eq!(flat.root_index as usize, flat.nodes.len() - 1);
}

#[test]
fn test_empty_tree_flattens_to_sentinel() {
    let flat = flatten_tree(None);

    assert!(flat.is_empty());
    assert_eq!(flat.root_index, -1);
    assert!(flat.identifiers.is_empty());
    assert_eq!(reconstruct_tree(&flat).unwrap(), None);
}

#[test]
fn test_payloadless_node_keeps_sentinel_id() {
    let tree = ColorNode {
        avg: [1.0, 2.0, 3.0],
        identifier: None,
        axis: 2,
        left: None,
        right: None,
    };

    let flat = flatten_tree(Some(&tree));

    assert_eq!(flat.nodes.len(), 1);
    assert_eq!(flat.nodes[0].payload_id, -1);
    assert!(flat.identifiers.is_empty());

    let rebuilt = reconstruct_tree(&flat).unwrap();
    assert_eq!(rebuilt, Some(tree));
}

#[test]
fn test_reconstruct_rejects_out_of_range_child() {
    let flat = FlatTree {
        nodes: vec![NodeRecord {
            avg: [0.0; 3],
            left: 5,
            right: -1,
            axis: 0,
            payload_id: -1,
        }],
        root_index: 0,
        identifiers: vec![],
    };

    assert!(reconstruct_tree(&flat).is_err());
}

#[test]
fn test_reconstruct_rejects_cycles() {
    let flat = FlatTree {
        nodes: vec![NodeRecord {
            avg: [0.0; 3],
            left: 0,
            right: -1,
            axis: 0,
            payload_id: -1,
        }],
        root_index: 0,
        identifiers: vec![],
    };

    assert!(reconstruct_tree(&flat).is_err());
}

#[test]
fn test_reconstruct_rejects_dangling_payload() {
    let flat = FlatTree {
        nodes: vec![NodeRecord {
            avg: [0.0; 3],
            left: -1,
            right: -1,
            axis: 0,
            payload_id: 3,
        }],
        root_index: 0,
        identifiers: vec!["only".to_string()],
    };

    assert!(reconstruct_tree(&flat).is_err());
}

#[test]
fn test_axis_cycles_with_depth() {
    let flat = flatten_tree(
        build_tree(
            (0..15)
                .map(|i| candidate(&format!("c{i}"), [i as f32, 255.0 - i as f32, i as f32 * 2.0]))
                .collect::<Vec<_>>(),
        )
        .as_ref(),
    );

    // Root splits on R; its children split on G
    let root = &flat.nodes[flat.root_index as usize];
    assert_eq!(root.axis, 0);
    assert_eq!(flat.nodes[root.left as usize].axis, 1);
    assert_eq!(flat.nodes[root.right as usize].axis, 1);
}
