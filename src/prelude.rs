//!
//! globally-available parts
//!
pub use crate::common::{Sequence, StateId, StateLabel, START_OBS};
pub use crate::hmm::model::HmmModel;
pub use crate::hmm::viterbi::ViterbiResult;
pub use crate::hmm::HmmError;
pub use crate::prob::{lp, p, Prob};
