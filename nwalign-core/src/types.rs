//! Shared alphabet definitions for the alignment pipeline.
//!
//! Sequences are plain byte slices over the fixed DNA alphabet
//! {A, C, G, T}. A compile-time lookup table maps each base to its
//! index into the substitution cost matrix.

/// Gap marker used in aligned output rows.
pub const GAP: u8 = b'_';

/// Number of symbols in the alphabet.
pub const ALPHABET_LEN: usize = 4;

/// The alphabet, in cost-matrix index order.
pub const ALPHABET: [u8; ALPHABET_LEN] = [b'A', b'C', b'G', b'T'];

const NOT_A_BASE: u8 = 0xff;

// 256-entry byte -> matrix-index table, built once, never mutated.
const BASE_INDEX: [u8; 256] = {
    let mut table = [NOT_A_BASE; 256];
    table[b'A' as usize] = 0;
    table[b'C' as usize] = 1;
    table[b'G' as usize] = 2;
    table[b'T' as usize] = 3;
    table
};

/// Cost-matrix index of `byte`, if it is a valid base.
#[inline]
pub fn base_index(byte: u8) -> Option<usize> {
    match BASE_INDEX[byte as usize] {
        NOT_A_BASE => None,
        idx => Some(idx as usize),
    }
}

/// Whether `byte` belongs to the alphabet.
#[inline]
pub fn is_base(byte: u8) -> bool {
    BASE_INDEX[byte as usize] != NOT_A_BASE
}
