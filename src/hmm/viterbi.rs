//!
//! Viterbi algorithm definitions
//!
use super::model::HmmModel;
use super::table::ViterbiTable;
use super::HmmError;
use crate::common::StateId;
use crate::prob::Prob;

///
/// Result of Viterbi decoding: the most probable state path and its
/// log probability.
///
#[derive(Debug, Clone, PartialEq)]
pub struct ViterbiResult {
    pub p: Prob,
    pub path: Vec<StateId>,
}

// wrappers and exposed functions
impl HmmModel {
    ///
    /// Run Viterbi decoding on the observed sequence.
    ///
    /// `v_i[k]` = P(best path emitting `x[0],...,x[i]` and ending in state `k`)
    ///
    /// `obs[0]` is the start sentinel aligned with the start state and
    /// is not scored. Deterministic: ties between predecessors resolve
    /// to the smallest state label.
    ///
    pub fn viterbi(&self, obs: &[u8]) -> Result<ViterbiResult, HmmError> {
        // only the start sentinel (or nothing at all): the start state alone
        if obs.len() <= 1 {
            return Ok(ViterbiResult {
                p: Prob::one(),
                path: vec![self.start()],
            });
        }
        let mut tables = Vec::with_capacity(obs.len());
        tables.push(self.v_init());
        for &symbol in obs[1..].iter() {
            let table = self.v_step(tables.last().unwrap(), symbol);
            tables.push(table);
        }
        // termination: best state of the final column
        let (p, last) = tables.last().unwrap().argmax();
        if p.is_zero() {
            return Err(HmmError::NoViablePath);
        }
        Ok(ViterbiResult {
            p,
            path: self.traceback(&tables, last),
        })
    }
    ///
    /// Create the initial column: certainty on the start state
    ///
    fn v_init(&self) -> ViterbiTable {
        let mut table = ViterbiTable::zero(self.n_states());
        table.p[self.start()] = Prob::one();
        table
    }
    ///
    /// Calculate one column from the previous column
    ///
    fn v_step(&self, prev: &ViterbiTable, symbol: u8) -> ViterbiTable {
        let mut table = ViterbiTable::zero(self.n_states());
        for to in 0..self.n_states() {
            // best predecessor; strictly-greater comparison over an
            // ascending scan keeps the lowest id on exact ties
            let mut best = Prob::zero();
            let mut best_from = None;
            for from in 0..self.n_states() {
                let cand = prev.p[from] * self.log_transition(from, to);
                if cand > best {
                    best = cand;
                    best_from = Some(from);
                }
            }
            // emission is constant over predecessors, applied after the max
            let cell = best * self.log_emission(to, symbol);
            if !cell.is_zero() {
                table.p[to] = cell;
                table.bp[to] = best_from;
            }
        }
        table
    }
    ///
    /// Walk the backpointers from the chosen final state back to
    /// column 0.
    ///
    fn traceback(&self, tables: &[ViterbiTable], last: StateId) -> Vec<StateId> {
        let mut path = vec![self.start(); tables.len()];
        let mut state = last;
        path[tables.len() - 1] = state;
        for i in (1..tables.len()).rev() {
            state = tables[i].bp[state].expect("viable cell without predecessor");
            path[i - 1] = state;
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hmm::mocks::mock_casino;

    #[test]
    fn viterbi_trivial_sequences() {
        let model = mock_casino();
        for obs in [b"".to_vec(), b"_".to_vec()] {
            let r = model.viterbi(&obs).unwrap();
            assert_eq!(r.path, vec![model.start()]);
            assert!(r.p.is_one());
        }
    }
    #[test]
    fn viterbi_single_roll() {
        let model = mock_casino();
        // a six: S->L (0.5) then emit 6 (0.5) beats S->F (0.5) * 1/6
        let r = model.viterbi(b"_6").unwrap();
        assert_eq!(model.path_to_string(&r.path), "SL");
        assert_abs_diff_eq!(r.p.to_log_value(), (0.5f64 * 0.5).ln(), epsilon = 1e-12);
        // a one: S->F (0.5 * 1/6) beats S->L (0.5 * 1/10)
        let r = model.viterbi(b"_1").unwrap();
        assert_eq!(model.path_to_string(&r.path), "SF");
        assert_abs_diff_eq!(r.p.to_log_value(), (0.5f64 / 6.0).ln(), epsilon = 1e-12);
    }
    #[test]
    fn viterbi_unmodeled_symbol_has_no_path() {
        let model = mock_casino();
        assert_eq!(model.viterbi(b"_7").unwrap_err(), HmmError::NoViablePath);
        // a single impossible position poisons the whole sequence
        assert_eq!(model.viterbi(b"_6671").unwrap_err(), HmmError::NoViablePath);
    }
    #[test]
    fn viterbi_table_invariant() {
        let model = mock_casino();
        let init = model.v_init();
        assert!(init.p[model.start()].is_one());
        let t = model.v_step(&init, b'6');
        // start state is never re-entered
        assert!(t.p[model.start()].is_zero());
        assert_eq!(t.bp[model.start()], None);
        // both dice are reachable from the start
        let f = model.state_id(b'F').unwrap();
        let l = model.state_id(b'L').unwrap();
        assert!(!t.p[f].is_zero());
        assert!(!t.p[l].is_zero());
        assert_eq!(t.bp[f], Some(model.start()));
        assert_eq!(t.bp[l], Some(model.start()));
    }
}
