//!
//! Scoring of a fixed candidate path
//!
//! No search happens here; this prices a specific hypothesis so that
//! two hypotheses can be compared as a log-odds ratio.
//!
use super::model::HmmModel;
use super::HmmError;
use crate::prob::Prob;
use itertools::Itertools;

impl HmmModel {
    ///
    /// Total log probability of a candidate state path (by label) for
    /// the observed sequence: every consecutive transition times every
    /// per-position emission.
    ///
    /// The path must have the same length as the observations. A label
    /// that is not a registered state scores as probability zero, like
    /// any other absent table entry.
    ///
    pub fn evaluate(&self, path: &[u8], obs: &[u8]) -> Result<Prob, HmmError> {
        if path.len() != obs.len() {
            return Err(HmmError::LengthMismatch {
                path_len: path.len(),
                seq_len: obs.len(),
            });
        }
        let transitions: Prob = path
            .iter()
            .tuple_windows()
            .map(|(&s, &t)| self.log_transition_by_label(s, t))
            .product();
        let emissions: Prob = path
            .iter()
            .zip(obs.iter())
            .map(|(&s, &sym)| self.log_emission_by_label(s, sym))
            .product();
        Ok(transitions * emissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hmm::mocks::mock_casino;

    #[test]
    fn evaluate_known_path() {
        let model = mock_casino();
        // S emits `_` with p=1, then S->L (0.5), emit 6 (0.5),
        // L->L (0.9), emit 6 (0.5)
        let p = model.evaluate(b"SLL", b"_66").unwrap();
        let expect = (0.5f64 * 0.5 * 0.9 * 0.5).ln();
        assert_abs_diff_eq!(p.to_log_value(), expect, epsilon = 1e-12);
    }
    #[test]
    fn evaluate_empty_path() {
        let model = mock_casino();
        assert!(model.evaluate(b"", b"").unwrap().is_one());
    }
    #[test]
    fn evaluate_length_mismatch() {
        let model = mock_casino();
        assert_eq!(
            model.evaluate(b"SLL", b"_6").unwrap_err(),
            HmmError::LengthMismatch {
                path_len: 3,
                seq_len: 2
            }
        );
    }
    #[test]
    fn evaluate_unknown_state_scores_zero() {
        let model = mock_casino();
        // `I` is not a state of the casino; the hypothesis is impossible
        let p = model.evaluate(b"SII", b"_66").unwrap();
        assert!(p.is_zero());
    }
    #[test]
    fn evaluate_impossible_transition_scores_zero() {
        let model = mock_casino();
        // nothing transitions back into the start state
        let p = model.evaluate(b"SLS", b"_6_").unwrap();
        assert!(p.is_zero());
    }
}
