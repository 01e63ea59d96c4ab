#![allow(dead_code)]

use std::collections::BTreeSet;

use suffix_tree::{NodeId, SuffixTree};

/// Distinct terminators for up to this many byte strings.
pub const TERMINATORS: &[u8] = b"$#%&!";

/// Copy of `text` closed by terminator number `ordinal`.
pub fn terminated(text: &[u8], ordinal: usize) -> Vec<u8> {
    let mut out = text.to_vec();
    out.push(TERMINATORS[ordinal]);
    out
}

/// Whether `needle` occurs in `haystack`; the empty needle always does.
pub fn naive_contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}

/// Start offsets of every occurrence of `needle` in `haystack`.
pub fn naive_offsets(haystack: &[u8], needle: &[u8]) -> Vec<usize> {
    (0..=haystack.len().saturating_sub(needle.len()))
        .filter(|&start| haystack[start..].starts_with(needle))
        .collect()
}

/// All distinct non-empty substrings of the inputs.
pub fn distinct_substrings<'s>(texts: impl IntoIterator<Item = &'s [u8]>) -> BTreeSet<Vec<u8>> {
    let mut out = BTreeSet::new();
    for text in texts {
        for start in 0..text.len() {
            for end in start + 1..=text.len() {
                out.insert(text[start..end].to_vec());
            }
        }
    }
    out
}

/// Every substring of every input is found and reads back unchanged.
pub fn assert_substrings_found(tree: &SuffixTree<'_, u8>, texts: &[&[u8]]) {
    for substring in distinct_substrings(texts.iter().copied()) {
        let position = tree
            .find_suffix(&substring)
            .unwrap_or_else(|| panic!("{:?} not found", String::from_utf8_lossy(&substring)));
        assert_eq!(tree.path_of(position).expect("position is in the tree"), substring);
    }
}

/// Paths of all explicit nodes, root excluded.
pub fn explicit_paths(tree: &SuffixTree<'_, u8>) -> Vec<Vec<u8>> {
    tree.nodes()
        .filter(|node| !node.is_root())
        .map(|node| tree.path(node).expect("node exists"))
        .collect()
}

/// Membership bit `k` is set exactly when the node's path occurs in
/// input `k`.
pub fn assert_membership_exact(tree: &SuffixTree<'_, u8>, texts: &[&[u8]]) {
    for node in tree.nodes() {
        let path = tree.path(node).expect("node exists");
        let bits = tree.membership(node).expect("membership is tracked");
        for (ordinal, text) in texts.iter().enumerate() {
            assert_eq!(
                bits.get(ordinal),
                naive_contains(text, &path),
                "node {} path {:?}, string {}",
                node,
                String::from_utf8_lossy(&path),
                ordinal
            );
        }
    }
}

/// Deepest explicit node at or above the end of `query`.
pub fn anchor_of(tree: &SuffixTree<'_, u8>, query: &[u8]) -> NodeId {
    let position = tree.find_suffix(query).expect("query present");
    if tree.is_explicit(position).expect("position is in the tree") {
        position.node()
    } else {
        tree.node(position.node())
            .and_then(|node| node.parent())
            .expect("implicit positions sit below a node")
    }
}
