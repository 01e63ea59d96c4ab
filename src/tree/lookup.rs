//! Walking the tree by symbols
//!
//! A [`Position`] names a point on an edge; it may fall between two explicit
//! nodes. `lookup` compares every symbol, `locate` skips along edges it
//! already knows to match and compares only first symbols.

use super::{NodeId, SuffixTree};
use crate::{Symbol, SuffixTreeError};

/// A point in the tree: `matched` symbols down the edge into `node`.
///
/// The position is explicit (sits on `node` itself) when the whole label
/// is matched, and implicit (inside the edge) otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) node: NodeId,
    pub(crate) matched: usize,
}

impl Position {
    /// The root itself.
    pub const ROOT: Position = Position {
        node: NodeId::ROOT,
        matched: 0,
    };

    /// Node whose incoming edge holds this position.
    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Symbols of the incoming edge consumed so far.
    #[inline]
    pub fn matched(&self) -> usize {
        self.matched
    }
}

/// Result of a longest-prefix search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongestMatch {
    /// Where the matched prefix ends
    pub position: Position,

    /// Index of the first query symbol that did not match; the query
    /// length when all of it matched
    pub mismatch: usize,
}

impl<'a, T: Symbol> SuffixTree<'a, T> {
    /// Position sitting exactly on `node`.
    pub fn explicit(&self, node: NodeId) -> Result<Position, SuffixTreeError> {
        self.checked(node)?;
        Ok(self.at_node(node))
    }

    #[inline]
    pub(crate) fn at_node(&self, node: NodeId) -> Position {
        Position {
            node,
            matched: self.label_len(node),
        }
    }

    /// Whether `position` sits on a node rather than inside an edge.
    pub fn is_explicit(&self, position: Position) -> Result<bool, SuffixTreeError> {
        self.checked_position(position)?;
        Ok(self.on_node(position))
    }

    #[inline]
    pub(crate) fn on_node(&self, position: Position) -> bool {
        position.matched == self.label_len(position.node)
    }

    /// `position` must name a node of this tree and lie on its edge.
    fn checked_position(&self, position: Position) -> Result<(), SuffixTreeError> {
        self.checked(position.node)?;
        if position.matched > self.label_len(position.node) {
            return Err(SuffixTreeError::InvalidPosition {
                node: position.node,
                matched: position.matched,
            });
        }
        Ok(())
    }

    /// Next label symbol below an implicit position.
    pub(crate) fn symbol_after(&self, position: Position) -> Option<&'a T> {
        self.edge(position.node).get(position.matched)
    }

    /// Advance one symbol from `position`.
    ///
    /// At an explicit node the child is chosen by first symbol; inside an
    /// edge the next label symbol must match.
    pub(crate) fn step(&self, position: Position, symbol: &T) -> Option<Position> {
        if self.on_node(position) {
            let child = self.child_starting_with(position.node, symbol)?;
            Some(Position {
                node: child,
                matched: 1,
            })
        } else if self.symbol_after(position)? == symbol {
            Some(Position {
                node: position.node,
                matched: position.matched + 1,
            })
        } else {
            None
        }
    }

    /// Walk `query` down from `from` as far as it matches.
    pub fn lookup_longest(
        &self,
        from: NodeId,
        query: &[T],
    ) -> Result<LongestMatch, SuffixTreeError> {
        self.checked(from)?;
        Ok(self.walk(from, query))
    }

    pub(crate) fn walk(&self, from: NodeId, query: &[T]) -> LongestMatch {
        let mut position = self.at_node(from);
        for (consumed, symbol) in query.iter().enumerate() {
            match self.step(position, symbol) {
                Some(next) => position = next,
                None => {
                    return LongestMatch {
                        position,
                        mismatch: consumed,
                    }
                }
            }
        }
        LongestMatch {
            position,
            mismatch: query.len(),
        }
    }

    /// Position reached by reading all of `query` from `from`, if any.
    pub fn lookup(&self, from: NodeId, query: &[T]) -> Result<Option<Position>, SuffixTreeError> {
        let found = self.lookup_longest(from, query)?;
        Ok((found.mismatch == query.len()).then_some(found.position))
    }

    /// Position of `query` read from the root. The empty query finds the
    /// root.
    pub fn find_suffix(&self, query: &[T]) -> Option<Position> {
        let found = self.walk(NodeId::ROOT, query);
        (found.mismatch == query.len()).then_some(found.position)
    }

    /// Longest prefix of `query` present in the tree.
    pub fn find_longest_match(&self, query: &[T]) -> LongestMatch {
        self.walk(NodeId::ROOT, query)
    }

    /// Whether `query` is a substring of some input.
    pub fn contains(&self, query: &[T]) -> bool {
        self.find_suffix(query).is_some()
    }

    /// Symbols from the root to `position`.
    pub fn path_of(&self, position: Position) -> Result<Vec<T>, SuffixTreeError> {
        self.checked_position(position)?;
        Ok(self.spell(position))
    }

    pub(crate) fn spell(&self, position: Position) -> Vec<T> {
        let mut path = match self.get(position.node).parent {
            Some(parent) => self.path_to(parent),
            None => Vec::new(),
        };
        path.extend_from_slice(&self.edge(position.node)[..position.matched]);
        path
    }

    /// Find where `range`, known to be present below `from`, ends.
    ///
    /// Skip/count descent: whole edges are jumped by length and only their
    /// first symbols are compared. A missing child means the tree does not
    /// hold what construction assumed it holds.
    pub(crate) fn locate(&self, from: NodeId, range: &[T]) -> Result<Position, SuffixTreeError> {
        let mut node = from;
        let mut rest = range;
        while let Some(first) = rest.first() {
            let child = self
                .child_starting_with(node, first)
                .ok_or_else(|| self.inconsistency(node, "skip/count descent left the tree"))?;
            let length = self.label_len(child);
            if rest.len() < length {
                return Ok(Position {
                    node: child,
                    matched: rest.len(),
                });
            }
            node = child;
            rest = &rest[length..];
        }
        Ok(self.at_node(node))
    }
}
