//! Suffix-tree vertices
//!
//! Nodes live in an arena owned by the tree and refer to each other by
//! [`NodeId`]. The parent owns its first child, each child owns its next
//! sibling; parent and suffix links are plain back-references.
//!
//! Edge labels never copy symbols: a [`Label`] is a half-open range into one
//! of the input strings.

use std::fmt;

use crate::bitset::BitSet;

/// Stable index of a node in the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root is always the first node allocated.
    pub const ROOT: NodeId = NodeId(0);

    /// Arena slot of this node.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }

    /// Whether this is the root id.
    #[inline]
    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// End boundary of an edge label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelEnd {
    /// Fixed end (exclusive).
    Bounded(usize),

    /// Leaf still growing with its string; resolved against the current
    /// phase while that string is being built.
    Open,
}

/// Edge label: `strings[string][begin..end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label {
    /// Ordinal of the input string the range points into.
    pub string: usize,

    /// First symbol (inclusive).
    pub begin: usize,

    /// Last symbol (exclusive), possibly open.
    pub end: LabelEnd,
}

impl Label {
    /// Empty label carried by the root.
    pub(crate) const EMPTY: Label = Label {
        string: 0,
        begin: 0,
        end: LabelEnd::Bounded(0),
    };

    /// Label of a fresh leaf starting at `begin`.
    pub(crate) fn open(string: usize, begin: usize) -> Self {
        Self {
            string,
            begin,
            end: LabelEnd::Open,
        }
    }

    /// Whether the end has not been fixed yet.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.end == LabelEnd::Open
    }
}

/// A single explicit vertex of the tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) label: Label,
    pub(crate) parent: Option<NodeId>,
    pub(crate) suffix_link: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
    pub(crate) membership: Option<BitSet>,

    /// `(string, matched)`: a suffix of `string` ends `matched` symbols
    /// down the incoming edge, without a node of its own. Only kept when
    /// membership is tracked.
    pub(crate) suffix_ends: Vec<(usize, usize)>,
}

impl Node {
    pub(crate) fn new(label: Label, membership: Option<BitSet>) -> Self {
        Self {
            label,
            parent: None,
            suffix_link: None,
            first_child: None,
            next_sibling: None,
            membership,
            suffix_ends: Vec::new(),
        }
    }

    /// Edge label from the parent to this node.
    pub fn label(&self) -> Label {
        self.label
    }

    /// Parent node, `None` only for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Node whose path is this node's path without its first symbol.
    pub fn suffix_link(&self) -> Option<NodeId> {
        self.suffix_link
    }

    /// Head of the child chain.
    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    /// Next child of the same parent.
    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling
    }

    /// Strings passing through this node, when membership is tracked.
    pub fn membership(&self) -> Option<&BitSet> {
        self.membership.as_ref()
    }

    /// Only the root has no parent.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Leaves have no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.first_child.is_none()
    }
}
