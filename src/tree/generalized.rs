//! Adding strings to an existing tree
//!
//! A new string first walks down from the root as far as it already
//! matches; Ukkonen phases resume from there with every suffix still
//! pending. Membership bits record which inputs each node's path occurs in.

use tracing::debug;

use super::ukkonen::Frontier;
use super::{NodeId, SuffixTree};
use crate::validate::validate;
use crate::{Symbol, SuffixTreeError};

impl<'a, T: Symbol> SuffixTree<'a, T> {
    /// Insert every suffix of `symbols` and return the string's ordinal.
    ///
    /// The tree borrows `symbols` for as long as it lives. Membership bits
    /// stay exact whether or not inputs end in a terminator.
    ///
    /// # Errors
    /// [`SuffixTreeError::MembershipCapacityExceeded`] once all membership
    /// slots are used; [`SuffixTreeError::Invalid`] when post-update
    /// validation is on and fails.
    pub fn extend(&mut self, symbols: &'a [T]) -> Result<usize, SuffixTreeError> {
        let ordinal = self.strings.len();
        if let Some(capacity) = self.config.membership_capacity {
            if ordinal >= capacity {
                return Err(SuffixTreeError::MembershipCapacityExceeded { capacity });
            }
        }
        self.strings.push(symbols);
        self.mark_membership(NodeId::ROOT, ordinal);

        let nodes_before = self.nodes.len();
        let resume = self.walk(NodeId::ROOT, symbols);
        debug!(
            string = ordinal,
            len = symbols.len(),
            shared_prefix = resume.mismatch,
            "extending tree"
        );

        let frontier = self.run_phases(ordinal, resume.mismatch, resume.position)?;
        if self.is_membership_tracked() {
            self.mark_implicit_suffixes(ordinal, frontier)?;
        }
        debug!(
            string = ordinal,
            new_nodes = self.nodes.len() - nodes_before,
            implicit_suffixes = symbols.len() - frontier.suffix,
            "tree extended"
        );

        if self.config.validate_updates {
            validate(self)?;
        }
        Ok(ordinal)
    }

    /// Set bit `string` on `from` and its ancestors, stopping at the first
    /// node that already has it.
    pub(super) fn mark_membership(&mut self, from: NodeId, string: usize) {
        let mut current = Some(from);
        while let Some(id) = current {
            let node = self.get_mut(id);
            match node.membership.as_mut() {
                Some(bits) if !bits.get(string) => bits.set(string),
                _ => break,
            }
            current = node.parent;
        }
    }

    /// Record membership for suffixes that ended without a leaf.
    ///
    /// Suffixes `frontier.suffix..` end inside the tree, at a node or inside
    /// an edge; the deepest explicit node at or above each end gets the bit.
    /// An end inside an edge is also remembered on the edge, so that a
    /// later split there hands the bit to the node it creates.
    fn mark_implicit_suffixes(
        &mut self,
        string: usize,
        frontier: Frontier,
    ) -> Result<(), SuffixTreeError> {
        let text = self.strings[string];
        let mut position = frontier.position;
        for suffix in frontier.suffix..text.len() {
            if suffix > frontier.suffix {
                position = self.suffix_link_lookup(position, text, suffix, text.len())?;
            }
            let anchor = if self.on_node(position) {
                position.node
            } else {
                self.get_mut(position.node)
                    .suffix_ends
                    .push((string, position.matched));
                self.parent_of(position.node)?
            };
            self.mark_membership(anchor, string);
        }
        Ok(())
    }
}
