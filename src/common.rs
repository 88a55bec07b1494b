//!
//! shared type aliases and constants
//!

/// Dense index of a registered state.
///
/// Assigned by sorted label registration, so the smallest label
/// always has the smallest id.
pub type StateId = usize;

/// Single-byte state label (`b'S'`, `b'F'`, ...)
pub type StateLabel = u8;

/// Type of observed symbol sequence
pub type Sequence = Vec<u8>;

/// Convert Sequence(Vec<u8>) into &str
/// useful in displaying
pub fn sequence_to_string(seq: &[u8]) -> &str {
    std::str::from_utf8(seq).unwrap()
}

///
/// sentinel observation at position 0, aligned with the start state
///
pub const START_OBS: u8 = b'_';
