//! # Online Generalized Suffix Trees
//!
//! This library builds suffix trees with Ukkonen's algorithm over any
//! sequence of comparable symbols, and extends them incrementally with more
//! strings (a generalized suffix tree).
//!
//! ## Core Algorithm
//!
//! 1. **Phases**: one per input symbol, each adding that symbol to every
//!    suffix that does not yet end in a leaf
//! 2. **Extensions**: suffix links plus skip/count descent relocate each
//!    suffix in amortized O(1)
//! 3. **Open leaves**: leaf labels grow with the input for free
//! 4. **Generalized extension**: a new string resumes construction after its
//!    longest prefix already present in the tree
//!
//! Result: O(n) amortized time and space per string of length n.
//!
//! ## Usage Example
//!
//! ```
//! use suffix_tree::SuffixTree;
//!
//! let text = b"mississippi$";
//! let tree = SuffixTree::build(text).unwrap();
//! let ssi = tree.find_suffix(b"ssi").unwrap();
//! assert_eq!(tree.path_of(ssi).unwrap(), b"ssi".to_vec());
//! assert!(tree.find_suffix(b"zzz").is_none());
//! ```

#![warn(missing_docs, missing_debug_implementations)]

use std::fmt;

// Core modules
pub mod bitset;   // Membership bit sets
pub mod tree;     // Node arena, lookup, Ukkonen builder
pub mod validate; // Debug-only invariant checks

// Re-exports for convenience
pub use bitset::BitSet;
pub use tree::{
    Children, Label, LabelEnd, Leaves, LongestMatch, Node, NodeId, Occurrence, Position,
    Preorder, SuffixTree, TreeStats,
};
pub use validate::{validate, Violation};

use thiserror::Error;

/// Anything a suffix tree can be built over.
///
/// Symbols are only compared for equality; `Debug` is used to render paths
/// in diagnostics.
pub trait Symbol: Clone + Eq + fmt::Debug {}

impl<T: Clone + Eq + fmt::Debug> Symbol for T {}

/// Construction parameters, fixed when the tree is created.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TreeConfig {
    /// Number of strings whose membership is tracked per node.
    ///
    /// `None` builds plain nodes without bit sets.
    pub membership_capacity: Option<usize>,

    /// Run the validator after every update pass.
    pub validate_updates: bool,
}

impl TreeConfig {
    /// Plain tree: no membership, no validation.
    pub fn plain() -> Self {
        Self::default()
    }

    /// Generalized tree tracking up to `num_strings` inputs per node.
    pub fn generalized(num_strings: usize) -> Self {
        Self {
            membership_capacity: Some(num_strings),
            validate_updates: false,
        }
    }

    /// Toggle validation after each update.
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_updates = enabled;
        self
    }

    /// Whether nodes carry membership bit sets.
    pub fn tracks_membership(&self) -> bool {
        self.membership_capacity.is_some()
    }
}

/// Errors raised while building or querying a tree
#[derive(Error, Debug)]
pub enum SuffixTreeError {
    /// More strings were added than the membership bit sets can hold.
    #[error("membership capacity of {capacity} strings exhausted")]
    MembershipCapacityExceeded {
        /// Configured number of strings
        capacity: usize,
    },

    /// Membership was queried on a tree built without it.
    #[error("tree was built without membership tracking")]
    MembershipNotTracked,

    /// Node id does not name a node of this tree.
    #[error("node {0} does not belong to this tree")]
    UnknownNode(NodeId),

    /// Position lies past the end of its node's edge.
    #[error("position {matched} symbols below node {node} is past the end of its edge")]
    InvalidPosition {
        /// Node named by the position
        node: NodeId,
        /// Symbols the position claims to have matched
        matched: usize,
    },

    /// Edge split requested outside the interior of a label.
    #[error("cannot split node {node} at offset {offset} of a {length}-symbol label")]
    InvalidSplit {
        /// Node whose incoming edge was to be split
        node: NodeId,
        /// Requested split offset
        offset: usize,
        /// Length of the edge label
        length: usize,
    },

    /// Construction found the tree in a state it can never legally reach.
    #[error("inconsistent tree at {path}: {detail}")]
    Inconsistent {
        /// Rendered root-to-node path of the offending node
        path: String,
        /// What was wrong
        detail: String,
    },

    /// Post-update validation failed.
    #[error("validation failed: {0}")]
    Invalid(#[from] Violation),
}
