//! Suffix tree over borrowed symbol strings
//!
//! The tree owns an arena of [`Node`]s and borrows every input string for
//! its whole lifetime; edge labels are ranges into those strings.
//!
//! Construction lives in `ukkonen` (single pass) and `generalized`
//! (adding further strings), lookups in `lookup`.

mod generalized;
mod lookup;
mod node;
mod ukkonen;

pub use lookup::{LongestMatch, Position};
pub use node::{Label, LabelEnd, Node, NodeId};

use std::cmp::Ordering;

use tracing::trace;

use crate::bitset::BitSet;
use crate::{Symbol, SuffixTreeError, TreeConfig};

/// String currently being inserted and how many of its symbols have been
/// read. Open leaves of that string end here.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    string: usize,
    end: usize,
}

/// Online generalized suffix tree
///
/// Every input string is borrowed for `'a`. Node ids stay valid for the
/// life of the tree: nodes are never removed, and a split keeps the id of
/// the lower half.
#[derive(Debug)]
pub struct SuffixTree<'a, T> {
    /// Inputs in insertion order; the index is the string's ordinal
    strings: Vec<&'a [T]>,

    /// Node arena, root at slot 0
    nodes: Vec<Node>,

    config: TreeConfig,

    /// Set only while a string is being inserted
    cursor: Option<Cursor>,
}

/// One occurrence of a query: `strings[string][offset..]` starts with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Occurrence {
    /// Ordinal of the input string
    pub string: usize,

    /// Offset of the occurrence within that string
    pub offset: usize,
}

/// Node counts of a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeStats {
    /// Input strings inserted so far
    pub strings: usize,

    /// All nodes including the root
    pub nodes: usize,

    /// Nodes without children
    pub leaves: usize,

    /// Non-root nodes with children
    pub internal: usize,

    /// Nodes carrying a suffix link
    pub suffix_links: usize,
}

impl<'a, T: Symbol> SuffixTree<'a, T> {
    /// Create an empty tree holding only the root.
    pub fn new(config: TreeConfig) -> Self {
        let membership = config.membership_capacity.map(BitSet::new);
        Self {
            strings: Vec::new(),
            nodes: vec![Node::new(Label::EMPTY, membership)],
            config,
            cursor: None,
        }
    }

    /// Empty tree tracking membership for up to `num_strings` inputs.
    pub fn generalized(num_strings: usize) -> Self {
        Self::new(TreeConfig::generalized(num_strings))
    }

    /// Build a plain suffix tree over `symbols`.
    ///
    /// Append a unique terminator to get exactly one leaf per suffix.
    pub fn build(symbols: &'a [T]) -> Result<Self, SuffixTreeError> {
        Self::build_with(symbols, TreeConfig::plain())
    }

    /// Build a suffix tree over `symbols` with an explicit configuration.
    pub fn build_with(symbols: &'a [T], config: TreeConfig) -> Result<Self, SuffixTreeError> {
        let mut tree = Self::new(config);
        tree.extend(symbols)?;
        Ok(tree)
    }

    /// Configuration the tree was created with.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Whether nodes carry membership bit sets.
    pub fn is_membership_tracked(&self) -> bool {
        self.config.tracks_membership()
    }

    /// All inputs, indexed by ordinal.
    pub fn strings(&self) -> &[&'a [T]] {
        &self.strings
    }

    /// Input with the given ordinal.
    pub fn string(&self, ordinal: usize) -> Option<&'a [T]> {
        self.strings.get(ordinal).copied()
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` while only the root exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// The root node id.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Node by id, `None` for ids from another tree.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn checked(&self, id: NodeId) -> Result<&Node, SuffixTreeError> {
        self.node(id).ok_or(SuffixTreeError::UnknownNode(id))
    }

    // ------------------------------------------------------------------
    // Labels and paths
    // ------------------------------------------------------------------

    /// Exclusive end of `label`, resolving open leaves.
    pub(crate) fn label_end(&self, label: &Label) -> usize {
        match label.end {
            LabelEnd::Bounded(end) => end,
            LabelEnd::Open => match self.cursor {
                Some(cursor) if cursor.string == label.string => cursor.end,
                _ => self.strings[label.string].len(),
            },
        }
    }

    /// Number of symbols on the edge into `id`.
    #[inline]
    pub(crate) fn label_len(&self, id: NodeId) -> usize {
        let label = &self.get(id).label;
        self.label_end(label) - label.begin
    }

    /// Symbols on the edge into `id`; empty for the root.
    pub fn label(&self, id: NodeId) -> Result<&'a [T], SuffixTreeError> {
        self.checked(id)?;
        Ok(self.edge(id))
    }

    pub(crate) fn edge(&self, id: NodeId) -> &'a [T] {
        if id.is_root() {
            return &[];
        }
        let label = self.get(id).label;
        let string: &'a [T] = self.strings[label.string];
        &string[label.begin..self.label_end(&label)]
    }

    /// First symbol of the edge into `id`.
    pub(crate) fn first_symbol(&self, id: NodeId) -> Option<&'a T> {
        self.edge(id).first()
    }

    /// Children of `id` in chain order.
    pub fn children(&self, id: NodeId) -> Result<Children<'_, 'a, T>, SuffixTreeError> {
        self.checked(id)?;
        Ok(self.child_chain(id))
    }

    pub(crate) fn child_chain(&self, id: NodeId) -> Children<'_, 'a, T> {
        Children {
            tree: self,
            next: self.get(id).first_child,
        }
    }

    /// Child of `id` whose edge starts with `symbol`.
    pub(crate) fn child_starting_with(&self, id: NodeId, symbol: &T) -> Option<NodeId> {
        self.child_chain(id)
            .find(|&child| self.first_symbol(child) == Some(symbol))
    }

    /// Concatenated labels from the root down to `id`.
    pub fn path(&self, id: NodeId) -> Result<Vec<T>, SuffixTreeError> {
        self.checked(id)?;
        Ok(self.path_to(id))
    }

    pub(crate) fn path_to(&self, id: NodeId) -> Vec<T> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            // A parent cycle is a corrupt tree; stop rather than spin.
            if chain.len() > self.nodes.len() {
                break;
            }
            chain.push(node);
            current = self.get(node).parent;
        }

        let mut path = Vec::new();
        for node in chain.into_iter().rev() {
            path.extend_from_slice(self.edge(node));
        }
        path
    }

    /// Length of [`path`](Self::path) without materializing it.
    pub fn depth(&self, id: NodeId) -> Result<usize, SuffixTreeError> {
        self.checked(id)?;
        Ok(self.depth_of(id))
    }

    pub(crate) fn depth_of(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = Some(id);
        while let Some(node) = current {
            depth += self.label_len(node);
            current = self.get(node).parent;
        }
        depth
    }

    /// Path rendered for diagnostics.
    pub(crate) fn render_path(&self, id: NodeId) -> String {
        format!("{:?}", self.path_to(id))
    }

    pub(crate) fn inconsistency(&self, id: NodeId, detail: &str) -> SuffixTreeError {
        SuffixTreeError::Inconsistent {
            path: self.render_path(id),
            detail: detail.to_string(),
        }
    }

    pub(crate) fn parent_of(&self, id: NodeId) -> Result<NodeId, SuffixTreeError> {
        self.get(id)
            .parent
            .ok_or_else(|| self.inconsistency(id, "non-root node without a parent"))
    }

    // ------------------------------------------------------------------
    // Traversal and queries
    // ------------------------------------------------------------------

    /// Every node, pre-order from the root.
    pub fn nodes(&self) -> Preorder<'_, 'a, T> {
        self.preorder(NodeId::ROOT)
    }

    /// `id` and all its descendants, pre-order.
    pub fn subtree(&self, id: NodeId) -> Result<Preorder<'_, 'a, T>, SuffixTreeError> {
        self.checked(id)?;
        Ok(self.preorder(id))
    }

    pub(crate) fn preorder(&self, id: NodeId) -> Preorder<'_, 'a, T> {
        Preorder {
            tree: self,
            stack: vec![id],
        }
    }

    /// Leaves at or below `id`.
    pub fn leaves(&self, id: NodeId) -> Result<Leaves<'_, 'a, T>, SuffixTreeError> {
        self.checked(id)?;
        Ok(self.leaves_below(id))
    }

    pub(crate) fn leaves_below(&self, id: NodeId) -> Leaves<'_, 'a, T> {
        Leaves {
            inner: self.preorder(id),
        }
    }

    /// Call `visit` once per distinct non-empty substring of the inputs,
    /// in depth-first order. The slice is only valid during the call.
    pub fn visit_substrings<F>(&self, mut visit: F)
    where
        F: FnMut(&[T]),
    {
        let mut buffer: Vec<T> = Vec::new();
        let mut stack = vec![(NodeId::ROOT, false)];
        while let Some((id, leaving)) = stack.pop() {
            if leaving {
                let keep = buffer.len() - self.label_len(id);
                buffer.truncate(keep);
                continue;
            }
            for symbol in self.edge(id) {
                buffer.push(symbol.clone());
                visit(&buffer);
            }
            stack.push((id, true));
            stack.extend(self.child_chain(id).map(|child| (child, false)));
        }
    }

    /// Every suffix of the inputs starting with `query`, sorted.
    ///
    /// Suffixes only count when they end in a leaf, which holds for every
    /// suffix once each input carries a unique terminator.
    pub fn find_all(&self, query: &[T]) -> Vec<Occurrence> {
        let Some(position) = self.find_suffix(query) else {
            return Vec::new();
        };
        let mut found: Vec<Occurrence> = self
            .leaves_below(position.node)
            .map(|leaf| {
                let string = self.get(leaf).label.string;
                Occurrence {
                    string,
                    offset: self.strings[string].len() - self.depth_of(leaf),
                }
            })
            .collect();
        found.sort_unstable();
        found
    }

    /// Membership bits of `id`: bit `k` is set exactly when the path of
    /// `id` occurs in input `k`.
    pub fn membership(&self, id: NodeId) -> Result<&BitSet, SuffixTreeError> {
        self.checked(id)?
            .membership
            .as_ref()
            .ok_or(SuffixTreeError::MembershipNotTracked)
    }

    /// Number of inputs containing the path of `id`.
    pub fn occurrences(&self, id: NodeId) -> Result<usize, SuffixTreeError> {
        Ok(self.membership(id)?.total_set())
    }

    /// Node counts.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            strings: self.strings.len(),
            nodes: self.nodes.len(),
            ..TreeStats::default()
        };
        for (index, node) in self.nodes.iter().enumerate() {
            if node.is_leaf() {
                if index != NodeId::ROOT.0 {
                    stats.leaves += 1;
                }
            } else if index != NodeId::ROOT.0 {
                stats.internal += 1;
            }
            if node.suffix_link.is_some() {
                stats.suffix_links += 1;
            }
        }
        stats
    }

    // ------------------------------------------------------------------
    // Arena mutation
    // ------------------------------------------------------------------

    pub(crate) fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Link `child` in as the first child of `parent`.
    pub(crate) fn add_child(&mut self, parent: NodeId, child: NodeId) {
        let head = self.get(parent).first_child;
        let node = self.get_mut(child);
        node.parent = Some(parent);
        node.next_sibling = head;
        self.get_mut(parent).first_child = Some(child);
    }

    /// Put `new` where `old` sits in `parent`'s child chain.
    fn replace_child(
        &mut self,
        parent: NodeId,
        old: NodeId,
        new: NodeId,
    ) -> Result<(), SuffixTreeError> {
        let next = self.get(old).next_sibling;
        let node = self.get_mut(new);
        node.parent = Some(parent);
        node.next_sibling = next;

        if self.get(parent).first_child == Some(old) {
            self.get_mut(parent).first_child = Some(new);
            return Ok(());
        }
        let mut current = self.get(parent).first_child;
        while let Some(sibling) = current {
            if self.get(sibling).next_sibling == Some(old) {
                self.get_mut(sibling).next_sibling = Some(new);
                return Ok(());
            }
            current = self.get(sibling).next_sibling;
        }
        Err(self.inconsistency(old, "node missing from its parent's child chain"))
    }

    /// Split the edge into `id` after `offset` symbols.
    ///
    /// Returns the new node carrying the first `offset` symbols; `id` keeps
    /// the rest and becomes its only child. The new node inherits the
    /// membership of `id`, plus every string with a suffix ending at or
    /// below the split point on this edge.
    pub(crate) fn split(&mut self, id: NodeId, offset: usize) -> Result<NodeId, SuffixTreeError> {
        let length = self.label_len(id);
        let parent = match self.get(id).parent {
            Some(parent) if offset > 0 && offset < length => parent,
            _ => {
                return Err(SuffixTreeError::InvalidSplit {
                    node: id,
                    offset,
                    length,
                })
            }
        };

        let lower = self.get(id).label;
        let upper = Label {
            string: lower.string,
            begin: lower.begin,
            end: LabelEnd::Bounded(lower.begin + offset),
        };
        let mut membership = self.get(id).membership.clone();
        let mut above = Vec::new();
        let mut below = Vec::new();
        for (string, matched) in std::mem::take(&mut self.get_mut(id).suffix_ends) {
            if matched >= offset {
                if let Some(bits) = membership.as_mut() {
                    bits.set(string);
                }
            }
            match matched.cmp(&offset) {
                Ordering::Less => above.push((string, matched)),
                Ordering::Equal => {}
                Ordering::Greater => below.push((string, matched - offset)),
            }
        }

        let inserted = self.push_node(Node::new(upper, membership));
        self.get_mut(inserted).suffix_ends = above;
        self.replace_child(parent, id, inserted)?;

        let node = self.get_mut(id);
        node.label.begin += offset;
        node.parent = Some(inserted);
        node.next_sibling = None;
        node.suffix_ends = below;
        self.get_mut(inserted).first_child = Some(id);

        trace!(node = %id, upper = %inserted, offset, "split edge");
        Ok(inserted)
    }

    /// Link `from` to `to`. A node is linked at most once.
    pub(crate) fn set_suffix_link(&mut self, from: NodeId, to: NodeId) -> Result<(), SuffixTreeError> {
        match self.get(from).suffix_link {
            Some(existing) if existing == to => return Ok(()),
            Some(_) => return Err(self.inconsistency(from, "suffix link set twice")),
            None if from == to => return Ok(()),
            None => {}
        }
        trace!(from = %from, to = %to, "suffix link");
        self.get_mut(from).suffix_link = Some(to);
        Ok(())
    }
}

/// Iterator over the children of one node
#[derive(Debug)]
pub struct Children<'t, 'a, T> {
    tree: &'t SuffixTree<'a, T>,
    next: Option<NodeId>,
}

impl<'t, 'a, T: Symbol> Iterator for Children<'t, 'a, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.get(current).next_sibling;
        Some(current)
    }
}

/// Pre-order iterator over a subtree
#[derive(Debug)]
pub struct Preorder<'t, 'a, T> {
    tree: &'t SuffixTree<'a, T>,
    stack: Vec<NodeId>,
}

impl<'t, 'a, T: Symbol> Iterator for Preorder<'t, 'a, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;
        let mark = self.stack.len();
        self.stack.extend(self.tree.child_chain(current));
        // Visit children in chain order.
        self.stack[mark..].reverse();
        Some(current)
    }
}

/// Leaves of a subtree, pre-order
#[derive(Debug)]
pub struct Leaves<'t, 'a, T> {
    inner: Preorder<'t, 'a, T>,
}

impl<'t, 'a, T: Symbol> Iterator for Leaves<'t, 'a, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let tree = self.inner.tree;
        self.inner.find(|&node| tree.get(node).is_leaf())
    }
}
