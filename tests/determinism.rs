use std::collections::HashSet;
use std::fmt::Write;

use blake3::hash;
use suffix_tree::{SuffixTree, TreeConfig};

/// One line per node: id, parent, link, membership, path.
fn render(tree: &SuffixTree<'_, u8>) -> String {
    let mut out = String::new();
    for node in tree.nodes() {
        let data = tree.node(node).expect("node exists");
        let bits = tree
            .membership(node)
            .map(|bits| bits.to_string())
            .unwrap_or_default();
        writeln!(
            out,
            "{}\t{:?}\t{:?}\t{}\t{}",
            node,
            data.parent(),
            data.suffix_link(),
            bits,
            String::from_utf8_lossy(&tree.path(node).expect("node exists"))
        )
        .expect("write to string");
    }
    out
}

#[test]
fn construction_is_deterministic() {
    let inputs: [&[u8]; 3] = [b"mississippi$", b"missouri#", b"sip%"];

    let mut fingerprints = HashSet::new();
    for _ in 0..5 {
        let mut tree = SuffixTree::new(TreeConfig::generalized(inputs.len()));
        for input in inputs {
            tree.extend(input).expect("insert succeeds");
        }
        fingerprints.insert(hash(render(&tree).as_bytes()));
    }

    assert_eq!(fingerprints.len(), 1, "trees diverged across runs");
}

#[test]
fn insertion_order_changes_shape_not_content() {
    let forward: [&[u8]; 2] = [b"abcab$", b"bcabd#"];
    let backward: [&[u8]; 2] = [b"bcabd#", b"abcab$"];

    let substrings = |inputs: [&'static [u8]; 2]| {
        let mut tree = SuffixTree::new(TreeConfig::plain());
        for input in inputs {
            tree.extend(input).expect("insert succeeds");
        }
        let mut seen = Vec::new();
        tree.visit_substrings(|substring| seen.push(substring.to_vec()));
        seen.sort();
        seen
    };

    assert_eq!(substrings(forward), substrings(backward));
}
