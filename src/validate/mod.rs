//! Structural checks for suffix trees
//!
//! Two read-only passes:
//!
//! 1. **Structure**: depth-first from the root, every node reached exactly
//!    once, parent pointers agree with the child chains, labels non-empty
//!    and in range, sibling edges start with distinct symbols, membership
//!    shrinks going down
//! 2. **Suffix links**: every link targets a reachable node whose path is
//!    the source path minus its first symbol
//!
//! Failures carry the offending node and, where meaningful, its rendered
//! path. Intended for tests and debugging; `TreeConfig::validate_updates`
//! runs it after every update.

use bitvec::prelude::*;
use thiserror::Error;

use crate::tree::{NodeId, SuffixTree};
use crate::Symbol;

/// A broken tree invariant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The root has a parent.
    #[error("root has parent {parent}")]
    RootHasParent {
        /// Recorded parent
        parent: NodeId,
    },

    /// The root has a suffix link.
    #[error("root has a suffix link to {target}")]
    RootHasSuffixLink {
        /// Link target
        target: NodeId,
    },

    /// A node was reached twice while walking down from the root.
    #[error("node {node} reached twice: not a tree")]
    Revisited {
        /// Node reached again
        node: NodeId,
    },

    /// A child's parent pointer does not point back.
    #[error("node {node} at {path} lists child {child}, whose parent is {recorded:?}")]
    IncorrectParent {
        /// Node listing the child
        node: NodeId,
        /// Child in question
        child: NodeId,
        /// Parent recorded on the child
        recorded: Option<NodeId>,
        /// Path of `node`
        path: String,
    },

    /// A non-root node has no parent.
    #[error("node {node} has no parent")]
    Orphan {
        /// Parentless node
        node: NodeId,
    },

    /// A node cannot be reached from the root.
    #[error("node {node} is unreachable from the root")]
    Unreachable {
        /// Unreachable node
        node: NodeId,
    },

    /// A label points outside its string.
    #[error("label of node {node} lies outside its string")]
    LabelOutOfRange {
        /// Node with the broken label
        node: NodeId,
    },

    /// A non-root node has an empty label.
    #[error("node {node} at {path} has an empty label")]
    EmptyLabel {
        /// Node with the empty label
        node: NodeId,
        /// Path of its parent
        path: String,
    },

    /// Two children of one node start with the same symbol.
    #[error("children {first} and {second} of node {node} at {path} start with the same symbol")]
    DuplicateBranch {
        /// Common parent
        node: NodeId,
        /// One child
        first: NodeId,
        /// The other child
        second: NodeId,
        /// Path of `node`
        path: String,
    },

    /// A suffix link targets a node outside the tree.
    #[error("suffix link of node {node} targets {target}, which is not in the tree")]
    DanglingSuffixLink {
        /// Link source
        node: NodeId,
        /// Link target
        target: NodeId,
    },

    /// A suffix link target's path is not the source path minus its first
    /// symbol.
    #[error("suffix link {path} -> {target_path} does not drop exactly one leading symbol")]
    BadSuffixLink {
        /// Link source
        node: NodeId,
        /// Link target
        target: NodeId,
        /// Path of `node`
        path: String,
        /// Path of `target`
        target_path: String,
    },

    /// Membership presence differs from the tree configuration.
    #[error("node {node} disagrees with the tree about membership tracking")]
    MembershipMismatch {
        /// Offending node
        node: NodeId,
    },

    /// A node carries a string its parent does not.
    #[error("node {node} at {path} carries strings missing from its parent")]
    MembershipNotInherited {
        /// Offending node
        node: NodeId,
        /// Path of `node`
        path: String,
    },
}

/// Check every structural and suffix-link invariant of `tree`.
///
/// Never modifies the tree; validating twice gives the same answer.
pub fn validate<T: Symbol>(tree: &SuffixTree<'_, T>) -> Result<(), Violation> {
    let visited = check_structure(tree)?;
    check_suffix_links(tree, &visited)
}

impl<'a, T: Symbol> SuffixTree<'a, T> {
    /// Run [`validate`] on this tree.
    pub fn validate(&self) -> Result<(), Violation> {
        validate(self)
    }
}

fn check_structure<T: Symbol>(tree: &SuffixTree<'_, T>) -> Result<BitVec, Violation> {
    let count = tree.len();
    let root = tree.get(NodeId::ROOT);
    if let Some(parent) = root.parent() {
        return Err(Violation::RootHasParent { parent });
    }
    if let Some(target) = root.suffix_link() {
        return Err(Violation::RootHasSuffixLink { target });
    }

    let tracked = tree.is_membership_tracked();
    let mut visited = bitvec![0; count];
    let mut stack = vec![NodeId::ROOT];

    while let Some(id) = stack.pop() {
        visited.set(id.index(), true);
        let node = tree.get(id);

        if node.membership().is_some() != tracked {
            return Err(Violation::MembershipMismatch { node: id });
        }

        let mut seen: Vec<NodeId> = Vec::new();
        for child in tree.child_chain(id) {
            // Checked before the parent pointer so a sibling cycle ends.
            if seen.contains(&child) || child.is_root() || visited[child.index()] {
                return Err(Violation::Revisited { node: child });
            }
            let recorded = tree.get(child).parent();
            if recorded != Some(id) {
                return Err(Violation::IncorrectParent {
                    node: id,
                    child,
                    recorded,
                    path: tree.render_path(id),
                });
            }
            check_label(tree, child)?;
            let symbol = tree.edge(child).first();
            if let Some(&first) = seen.iter().find(|&&other| tree.edge(other).first() == symbol) {
                return Err(Violation::DuplicateBranch {
                    node: id,
                    first,
                    second: child,
                    path: tree.render_path(id),
                });
            }
            if let (Some(bits), Some(parent_bits)) = (tree.get(child).membership(), node.membership()) {
                if !bits.is_subset(parent_bits) {
                    return Err(Violation::MembershipNotInherited {
                        node: child,
                        path: tree.render_path(child),
                    });
                }
            }
            seen.push(child);
            stack.push(child);
        }
    }

    if let Some(index) = visited.first_zero() {
        let id = NodeId(index);
        return Err(match tree.get(id).parent() {
            None => Violation::Orphan { node: id },
            Some(_) => Violation::Unreachable { node: id },
        });
    }
    Ok(visited)
}

/// Labels must lie within their string and, off the root, be non-empty.
fn check_label<T: Symbol>(tree: &SuffixTree<'_, T>, id: NodeId) -> Result<(), Violation> {
    let label = tree.get(id).label();
    let Some(string) = tree.string(label.string) else {
        return Err(Violation::LabelOutOfRange { node: id });
    };
    let end = tree.label_end(&label);
    if label.begin > end || end > string.len() {
        return Err(Violation::LabelOutOfRange { node: id });
    }
    if label.begin == end {
        let path = match tree.get(id).parent() {
            Some(parent) => tree.render_path(parent),
            None => String::new(),
        };
        return Err(Violation::EmptyLabel { node: id, path });
    }
    Ok(())
}

fn check_suffix_links<T: Symbol>(
    tree: &SuffixTree<'_, T>,
    visited: &BitSlice,
) -> Result<(), Violation> {
    for index in visited.iter_ones() {
        let id = NodeId(index);
        let Some(target) = tree.get(id).suffix_link() else {
            continue;
        };
        if target.index() >= tree.len() || !visited[target.index()] {
            return Err(Violation::DanglingSuffixLink { node: id, target });
        }
        let path = tree.path_to(id);
        let target_path = tree.path_to(target);
        if path.is_empty() || path[1..] != target_path[..] {
            return Err(Violation::BadSuffixLink {
                node: id,
                target,
                path: format!("{:?}", path),
                target_path: format!("{:?}", target_path),
            });
        }
    }
    Ok(())
}
