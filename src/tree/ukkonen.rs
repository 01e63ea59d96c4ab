//! Ukkonen's online construction
//!
//! Phase `i` reads `text[i]` and extends every suffix `text[j..i]` that does
//! not end in a leaf yet:
//!
//! - Rule 1: the suffix ends in a leaf. Open leaves grow with the cursor, so
//!   these extensions cost nothing and are never visited.
//! - Rule 2: the next symbol is missing. Split the edge if the suffix ends
//!   inside one, then hang a new open leaf.
//! - Rule 3: the next symbol is already there. Every later suffix has it
//!   too, so the phase ends.
//!
//! The first suffix still without a leaf, and where it ends, carry over
//! from one phase to the next as a [`Frontier`].

use tracing::trace;

use super::{Cursor, Label, LabelEnd, Node, NodeId, Position, SuffixTree};
use crate::bitset::BitSet;
use crate::{Symbol, SuffixTreeError};

/// First suffix without a leaf and the position where it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Frontier {
    pub(super) suffix: usize,
    pub(super) position: Position,
}

/// Outcome of extending one suffix by one symbol
#[derive(Debug, Clone, Copy)]
enum Extension {
    /// Rule 2: a leaf now hangs below `anchor`. `pending` still needs its
    /// suffix link.
    Inserted {
        anchor: NodeId,
        pending: Option<NodeId>,
    },

    /// Rule 3: the extended suffix was already present.
    Present(Position),
}

impl<'a, T: Symbol> SuffixTree<'a, T> {
    /// Run phases `first_phase..` over string `string`.
    ///
    /// `start` is where `text[0..first_phase]` ends. Leaves opened here are
    /// closed at the end of the string before returning.
    pub(super) fn run_phases(
        &mut self,
        string: usize,
        first_phase: usize,
        start: Position,
    ) -> Result<Frontier, SuffixTreeError> {
        let text = self.strings[string];
        let mut frontier = Frontier {
            suffix: 0,
            position: start,
        };
        let mut opened = Vec::new();

        for phase in first_phase..text.len() {
            self.cursor = Some(Cursor {
                string,
                end: phase + 1,
            });
            frontier = self.do_phase(string, phase, frontier, &mut opened)?;
        }

        self.cursor = None;
        for leaf in opened {
            self.get_mut(leaf).label.end = LabelEnd::Bounded(text.len());
        }
        Ok(frontier)
    }

    /// One phase: extend suffixes `frontier.suffix..=phase` by `text[phase]`.
    fn do_phase(
        &mut self,
        string: usize,
        phase: usize,
        frontier: Frontier,
        opened: &mut Vec<NodeId>,
    ) -> Result<Frontier, SuffixTreeError> {
        let text = self.strings[string];
        let symbol = &text[phase];
        trace!(string, phase, first_suffix = frontier.suffix, "phase");

        let mut pending = None;
        let mut previous = frontier.position;
        for suffix in frontier.suffix..=phase {
            let located = if suffix == frontier.suffix {
                frontier.position
            } else {
                self.suffix_link_lookup(previous, text, suffix, phase)?
            };

            match self.do_extension(string, suffix, phase, located, pending, opened)? {
                Extension::Present(position) => {
                    let position = self
                        .step(position, symbol)
                        .ok_or_else(|| self.inconsistency(position.node, "rule 3 without a match"))?;
                    return Ok(Frontier { suffix, position });
                }
                Extension::Inserted {
                    anchor,
                    pending: next,
                } => {
                    pending = next;
                    previous = self.at_node(anchor);
                }
            }
        }

        // Every suffix, the empty one included, now ends in a leaf.
        Ok(Frontier {
            suffix: phase + 1,
            position: Position::ROOT,
        })
    }

    /// Where `text[suffix..end]` ends, given `previous`, the end of
    /// `text[suffix - 1..end]`.
    ///
    /// Follows the nearest suffix link at or above `previous` and re-descends
    /// the symbols skipped on the way up. Nodes without a link are passed
    /// over, so a missing link costs time, never correctness.
    pub(crate) fn suffix_link_lookup(
        &self,
        previous: Position,
        text: &[T],
        suffix: usize,
        end: usize,
    ) -> Result<Position, SuffixTreeError> {
        let (mut node, mut skipped) = if self.on_node(previous) {
            (previous.node, 0)
        } else {
            (self.parent_of(previous.node)?, previous.matched)
        };
        while !node.is_root() && self.get(node).suffix_link.is_none() {
            skipped += self.label_len(node);
            node = self.parent_of(node)?;
        }

        match self.get(node).suffix_link {
            Some(target) => self.locate(target, &text[end - skipped..end]),
            None => self.locate(NodeId::ROOT, &text[suffix..end]),
        }
    }

    /// Extend the suffix ending at `located` by `text[phase]`.
    fn do_extension(
        &mut self,
        string: usize,
        suffix: usize,
        phase: usize,
        located: Position,
        pending: Option<NodeId>,
        opened: &mut Vec<NodeId>,
    ) -> Result<Extension, SuffixTreeError> {
        let text = self.strings[string];
        let symbol = &text[phase];

        let (anchor, split) = if self.on_node(located) {
            if self.child_starting_with(located.node, symbol).is_some() {
                if let Some(from) = pending {
                    self.set_suffix_link(from, located.node)?;
                }
                trace!(suffix, phase, node = %located.node, "rule 3 at node");
                return Ok(Extension::Present(located));
            }
            (located.node, false)
        } else {
            if self.symbol_after(located) == Some(symbol) {
                // No explicit target for `pending`; lookups walk past it.
                trace!(suffix, phase, node = %located.node, "rule 3 inside edge");
                return Ok(Extension::Present(located));
            }
            (self.split(located.node, located.matched)?, true)
        };

        let membership = self.leaf_membership(string);
        let leaf = self.push_node(Node::new(Label::open(string, phase), membership));
        self.add_child(anchor, leaf);
        opened.push(leaf);
        self.mark_membership(anchor, string);
        if let Some(from) = pending {
            self.set_suffix_link(from, anchor)?;
        }
        trace!(suffix, phase, anchor = %anchor, leaf = %leaf, split, "rule 2");

        let needs_link = !anchor.is_root() && (split || self.get(anchor).suffix_link.is_none());
        Ok(Extension::Inserted {
            anchor,
            pending: needs_link.then_some(anchor),
        })
    }

    /// Membership of a fresh leaf of `string`.
    fn leaf_membership(&self, string: usize) -> Option<BitSet> {
        self.config.membership_capacity.map(|capacity| {
            let mut bits = BitSet::new(capacity);
            bits.set(string);
            bits
        })
    }
}
