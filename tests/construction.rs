mod common;

use std::collections::BTreeSet;

use common::{
    assert_substrings_found, distinct_substrings, explicit_paths, naive_contains, naive_offsets,
    terminated,
};
use suffix_tree::{validate, Occurrence, SuffixTree, TreeConfig};
use test_case::test_case;

#[test_case(b"xyzxzxy" ; "xyzxzxy")]
#[test_case(b"mississippi" ; "mississippi")]
#[test_case(b"abababc" ; "abababc")]
#[test_case(b"bananas" ; "bananas")]
#[test_case(b"bookkeeper" ; "bookkeeper")]
fn finds_every_substring(text: &[u8]) {
    let plain = SuffixTree::build(text).expect("build succeeds");
    validate(&plain).expect("plain tree is valid");
    assert_substrings_found(&plain, &[text]);

    let closed = terminated(text, 0);
    let tree = SuffixTree::build(&closed).expect("build succeeds");
    validate(&tree).expect("terminated tree is valid");
    assert_substrings_found(&tree, &[&closed]);
}

#[test_case(b"xyzxzxy" ; "xyzxzxy")]
#[test_case(b"mississippi" ; "mississippi")]
#[test_case(b"abababc" ; "abababc")]
#[test_case(b"bananas" ; "bananas")]
#[test_case(b"bookkeeper" ; "bookkeeper")]
fn rejects_extensions_that_do_not_occur(text: &[u8]) {
    let tree = SuffixTree::build(text).expect("build succeeds");
    let alphabet: BTreeSet<u8> = text.iter().copied().chain([b'q']).collect();

    for substring in distinct_substrings([text]) {
        for &symbol in &alphabet {
            let mut query = substring.clone();
            query.push(symbol);
            assert_eq!(
                tree.contains(&query),
                naive_contains(text, &query),
                "query {:?}",
                String::from_utf8_lossy(&query)
            );
        }
    }
}

#[test_case(b"xyzxzxy" ; "xyzxzxy")]
#[test_case(b"mississippi" ; "mississippi")]
#[test_case(b"abababc" ; "abababc")]
#[test_case(b"bananas" ; "bananas")]
#[test_case(b"bookkeeper" ; "bookkeeper")]
fn terminated_tree_has_one_leaf_per_suffix(text: &[u8]) {
    let closed = terminated(text, 0);
    let tree = SuffixTree::build(&closed).expect("build succeeds");

    let leaf_paths: BTreeSet<Vec<u8>> = tree
        .leaves(tree.root())
        .expect("root exists")
        .map(|leaf| tree.path(leaf).expect("leaf exists"))
        .collect();
    let suffixes: BTreeSet<Vec<u8>> = (0..closed.len()).map(|i| closed[i..].to_vec()).collect();
    assert_eq!(leaf_paths, suffixes);

    // Non-root internal nodes branch.
    for node in tree.nodes().filter(|node| !node.is_root()) {
        let children = tree.children(node).expect("node exists").count();
        assert!(children == 0 || children >= 2, "node {} has one child", node);
    }

    let paths = explicit_paths(&tree);
    let distinct: BTreeSet<_> = paths.iter().cloned().collect();
    assert_eq!(paths.len(), distinct.len(), "two nodes share a path");
}

#[test_case(b"xyzxzxy" ; "xyzxzxy")]
#[test_case(b"mississippi" ; "mississippi")]
#[test_case(b"bookkeeper" ; "bookkeeper")]
fn visits_each_substring_once(text: &[u8]) {
    let tree = SuffixTree::build(text).expect("build succeeds");
    let mut visited = Vec::new();
    tree.visit_substrings(|substring| visited.push(substring.to_vec()));

    let unique: BTreeSet<Vec<u8>> = visited.iter().cloned().collect();
    assert_eq!(visited.len(), unique.len(), "a substring was visited twice");
    assert_eq!(unique, distinct_substrings([text]));
}

#[test]
fn mississippi_lookups() {
    let tree = SuffixTree::build(b"mississippi$").expect("build succeeds");

    let ssi = tree.find_suffix(b"ssi").expect("ssi occurs");
    assert_eq!(tree.path_of(ssi).expect("ssi is in the tree"), b"ssi".to_vec());
    assert!(tree.find_suffix(b"zzz").is_none());

    let issi = tree.find_suffix(b"issi").expect("issi occurs");
    assert_eq!(tree.is_explicit(issi).ok(), Some(true));
    assert_eq!(tree.depth(issi.node()).ok(), Some(4));

    let longest = tree.find_longest_match(b"ssippix");
    assert_eq!(longest.mismatch, 6);
    assert_eq!(tree.path_of(longest.position).ok(), Some(b"ssippi".to_vec()));
}

#[test]
fn bananas_has_eight_leaves() {
    let tree = SuffixTree::build(b"bananas$").expect("build succeeds");
    let stats = tree.stats();
    assert_eq!(stats.leaves, 8);
    assert_eq!(tree.leaves(tree.root()).expect("root exists").count(), 8);
    assert_eq!(stats.strings, 1);
    assert_eq!(stats.nodes, 1 + stats.leaves + stats.internal);
    assert_eq!(stats.suffix_links, stats.internal);
}

#[test]
fn find_all_reports_every_offset() {
    let text = b"abracadabra$";
    let tree = SuffixTree::build(text).expect("build succeeds");

    for query in [&b"a"[..], b"abra", b"bra", b"cad", b"ra$", b"x"] {
        let expected: Vec<Occurrence> = naive_offsets(text, query)
            .into_iter()
            .map(|offset| Occurrence { string: 0, offset })
            .collect();
        assert_eq!(tree.find_all(query), expected, "query {:?}", query);
    }
    assert_eq!(tree.find_all(b"").len(), text.len());
}

#[test]
fn explicit_node_paths_round_trip() {
    let tree = SuffixTree::build(b"bookkeeper$").expect("build succeeds");
    for node in tree.nodes() {
        let path = tree.path(node).expect("node exists");
        let position = tree.find_suffix(&path).expect("node path is present");
        assert_eq!(position.node(), node);
        assert_eq!(tree.is_explicit(position).ok(), Some(true));
        assert_eq!(tree.depth(node).ok(), Some(path.len()));
    }
}

#[test]
fn validation_is_idempotent() {
    let tree = SuffixTree::build_with(b"abcabxabcd$", TreeConfig::plain().with_validation(true))
        .expect("validated build succeeds");
    let first = validate(&tree);
    let second = validate(&tree);
    assert_eq!(first, Ok(()));
    assert_eq!(first, second);
}

#[test]
fn works_over_non_byte_symbols() {
    let words = ["to", "be", "or", "not", "to", "be", "$"];
    let tree = SuffixTree::build(&words).expect("build succeeds");
    validate(&tree).expect("tree is valid");
    assert!(tree.contains(&["not", "to", "be"]));
    assert!(!tree.contains(&["be", "to"]));
    assert_eq!(tree.find_all(&["to", "be"]).len(), 2);
}
