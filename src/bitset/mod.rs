//! Word-packed membership bit set
//!
//! One bit per input string: bit `i` is set on a node when the string with
//! ordinal `i` passes through it. The size is fixed at construction and the
//! storage is an array of words of type `W` (`u8` up to `u64`/`usize`).

use std::fmt;
use std::mem;
use std::ops::BitOrAssign;

use bitvec::prelude::*;

/// Fixed-size bit set backed by machine words of type `W`.
#[derive(Clone, PartialEq, Eq)]
pub struct BitSet<W: BitStore = usize> {
    bits: BitVec<W, Lsb0>,
}

impl<W: BitStore> BitSet<W> {
    /// Create a set of `num_bits` bits, all unset.
    pub fn new(num_bits: usize) -> Self {
        Self {
            bits: BitVec::repeat(false, num_bits),
        }
    }

    /// Number of bits in each storage word.
    #[inline]
    pub fn bits_per_word() -> usize {
        mem::size_of::<W>() * 8
    }

    /// Number of storage words needed for `num_bits` bits.
    pub fn words_for(num_bits: usize) -> usize {
        if num_bits == 0 {
            0
        } else {
            (num_bits - 1) / Self::bits_per_word() + 1
        }
    }

    /// Number of bits tracked (fixed at construction).
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns `true` when the set tracks zero bits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of words actually backing the set.
    pub fn num_words(&self) -> usize {
        self.bits.as_raw_slice().len()
    }

    /// Set `bit`.
    ///
    /// # Panics
    /// Panics if `bit >= self.len()`.
    #[inline]
    pub fn set(&mut self, bit: usize) {
        self.bits.set(bit, true);
    }

    /// Clear `bit`.
    ///
    /// # Panics
    /// Panics if `bit >= self.len()`.
    #[inline]
    pub fn unset(&mut self, bit: usize) {
        self.bits.set(bit, false);
    }

    /// Test `bit`. Bits beyond the end read as unset.
    #[inline]
    pub fn get(&self, bit: usize) -> bool {
        self.bits.get(bit).map_or(false, |b| *b)
    }

    /// The total number of bits set.
    pub fn total_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Indices of the set bits, ascending.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Bitwise OR `other` into `self`.
    ///
    /// Only the overlapping prefix is combined; `self` keeps its length.
    pub fn union_with(&mut self, other: &BitSet<W>) {
        *self.bits.as_mut_bitslice() |= other.bits.as_bitslice();
    }

    /// `true` if every bit set here is also set in `other`.
    pub fn is_subset(&self, other: &BitSet<W>) -> bool {
        self.ones().all(|bit| other.get(bit))
    }
}

impl<W: BitStore> BitOrAssign<&BitSet<W>> for BitSet<W> {
    fn bitor_assign(&mut self, rhs: &BitSet<W>) {
        self.union_with(rhs);
    }
}

impl<W: BitStore> fmt::Debug for BitSet<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitSet<{}>", self.len())?;
        f.debug_set().entries(self.ones()).finish()
    }
}

impl<W: BitStore> fmt::Display for BitSet<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter().by_vals() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
