//!
//! first-order HMM decoding
//!
//! * `model`: state registry and dense log-probability tables
//! * `viterbi`: most-probable-path decoding
//! * `evaluate`: scoring of a candidate path
//!
pub mod evaluate;
pub mod mocks;
pub mod model;
pub mod table;
pub mod viterbi;

use thiserror::Error;

///
/// Errors surfaced by model construction and decoding.
///
/// Absent transition/emission entries are not errors; they score as
/// probability zero inside the recurrence.
///
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HmmError {
    /// malformed probability table, fatal to model construction
    #[error("invalid model: state `{state}`: {reason}")]
    InvalidModel { state: String, reason: String },
    /// every state of the final Viterbi column is at the sentinel
    #[error("no viable state path for the observed sequence")]
    NoViablePath,
    /// candidate path and observed sequence differ in length
    #[error("path length {path_len} does not match sequence length {seq_len}")]
    LengthMismatch { path_len: usize, seq_len: usize },
}
