//!
//! Definition of the decoding model
//!
//! Nominal probability tables (state -> {state-or-symbol -> prob}) are
//! registered into dense two-dimensional log-space tables at
//! construction. Pairs absent from the input stay at the sentinel.
//!
use super::HmmError;
use crate::common::{StateId, StateLabel};
use crate::prob::Prob;
use fnv::FnvHashMap;
use std::collections::BTreeMap;

/// probability row, keyed by target state or emitted symbol
pub type ProbRow = BTreeMap<u8, f64>;

/// nominal probability table, state -> row
pub type ProbTable = BTreeMap<u8, ProbRow>;

/// allowed deviation of a row sum from 1 under strict validation
pub const SUM_TOLERANCE: f64 = 1e-6;

///
/// First-order HMM: transition and emission log-probability tables
/// over a registered state set.
///
/// States and symbols are registered in sorted label order, so the
/// smallest label owns the smallest `StateId`. Read-only once built;
/// shareable across any number of concurrent decodes.
///
#[derive(Debug, Clone)]
pub struct HmmModel {
    /// registered state labels, ascending
    labels: Vec<StateLabel>,
    /// registered emission symbols, ascending
    symbols: Vec<u8>,
    /// the distinguished start state
    start: StateId,
    label_index: FnvHashMap<StateLabel, StateId>,
    symbol_index: FnvHashMap<u8, usize>,
    /// `n_states x n_states` row-major log transition table
    trans: Vec<Prob>,
    /// `n_states x n_symbols` row-major log emission table
    emit: Vec<Prob>,
}

impl HmmModel {
    ///
    /// Build a model from nominal probability tables.
    ///
    /// Rejects probabilities outside `[0, 1]` and an unregistered
    /// start state. Row sums are not checked; use
    /// [`HmmModel::from_tables_strict`] for that.
    ///
    pub fn from_tables(
        start: StateLabel,
        transition: &ProbTable,
        emission: &ProbTable,
    ) -> Result<HmmModel, HmmError> {
        Self::build(start, transition, emission, false)
    }
    ///
    /// `from_tables` plus the stricter check that every present
    /// transition and emission row sums to 1 within `SUM_TOLERANCE`.
    ///
    pub fn from_tables_strict(
        start: StateLabel,
        transition: &ProbTable,
        emission: &ProbTable,
    ) -> Result<HmmModel, HmmError> {
        Self::build(start, transition, emission, true)
    }
    fn build(
        start: StateLabel,
        transition: &ProbTable,
        emission: &ProbTable,
        strict: bool,
    ) -> Result<HmmModel, HmmError> {
        validate_table(transition, strict)?;
        validate_table(emission, strict)?;

        // register states: every label occurring anywhere in the tables
        let mut labels: Vec<StateLabel> = transition
            .keys()
            .chain(transition.values().flat_map(|row| row.keys()))
            .chain(emission.keys())
            .copied()
            .collect();
        labels.sort_unstable();
        labels.dedup();
        if labels.is_empty() {
            return Err(HmmError::InvalidModel {
                state: label_to_string(start),
                reason: "state set is empty".to_string(),
            });
        }
        let label_index: FnvHashMap<StateLabel, StateId> = labels
            .iter()
            .enumerate()
            .map(|(id, &label)| (label, id))
            .collect();
        let start = *label_index.get(&start).ok_or_else(|| HmmError::InvalidModel {
            state: label_to_string(start),
            reason: "start state is missing from the tables".to_string(),
        })?;

        // register the emission alphabet
        let mut symbols: Vec<u8> = emission
            .values()
            .flat_map(|row| row.keys())
            .copied()
            .collect();
        symbols.sort_unstable();
        symbols.dedup();
        let symbol_index: FnvHashMap<u8, usize> = symbols
            .iter()
            .enumerate()
            .map(|(col, &sym)| (sym, col))
            .collect();

        // log-transform into dense tables, once
        let n = labels.len();
        let m = symbols.len();
        let mut trans = vec![Prob::zero(); n * n];
        for (s, row) in transition {
            for (t, &prob) in row {
                trans[label_index[s] * n + label_index[t]] = Prob::from_prob(prob);
            }
        }
        let mut emit = vec![Prob::zero(); n * m];
        for (s, row) in emission {
            for (sym, &prob) in row {
                emit[label_index[s] * m + symbol_index[sym]] = Prob::from_prob(prob);
            }
        }

        Ok(HmmModel {
            labels,
            symbols,
            start,
            label_index,
            symbol_index,
            trans,
            emit,
        })
    }
    ///
    /// Return the number of registered states
    ///
    pub fn n_states(&self) -> usize {
        self.labels.len()
    }
    ///
    /// Return the size of the registered emission alphabet
    ///
    pub fn n_symbols(&self) -> usize {
        self.symbols.len()
    }
    ///
    /// id of the start state
    ///
    pub fn start(&self) -> StateId {
        self.start
    }
    ///
    /// label of a registered state
    ///
    pub fn label(&self, state: StateId) -> StateLabel {
        self.labels[state]
    }
    ///
    /// registered labels, in id order
    ///
    pub fn labels(&self) -> &[StateLabel] {
        &self.labels
    }
    ///
    /// id of a label, if registered
    ///
    pub fn state_id(&self, label: StateLabel) -> Option<StateId> {
        self.label_index.get(&label).copied()
    }
    ///
    /// log transition probability `from -> to`
    ///
    pub fn log_transition(&self, from: StateId, to: StateId) -> Prob {
        self.trans[from * self.n_states() + to]
    }
    ///
    /// log probability that `state` emits `symbol`.
    /// An unregistered symbol scores as zero probability.
    ///
    pub fn log_emission(&self, state: StateId, symbol: u8) -> Prob {
        match self.symbol_index.get(&symbol) {
            Some(&col) => self.emit[state * self.n_symbols() + col],
            None => Prob::zero(),
        }
    }
    ///
    /// label-level transition lookup; unregistered labels score as zero
    ///
    pub fn log_transition_by_label(&self, from: StateLabel, to: StateLabel) -> Prob {
        match (self.state_id(from), self.state_id(to)) {
            (Some(s), Some(t)) => self.log_transition(s, t),
            _ => Prob::zero(),
        }
    }
    ///
    /// label-level emission lookup; an unregistered label scores as zero
    ///
    pub fn log_emission_by_label(&self, state: StateLabel, symbol: u8) -> Prob {
        match self.state_id(state) {
            Some(s) => self.log_emission(s, symbol),
            None => Prob::zero(),
        }
    }
    ///
    /// Render a state path as its label string, e.g. `"SFFLL"`
    ///
    pub fn path_to_string(&self, path: &[StateId]) -> String {
        path.iter().map(|&s| self.labels[s] as char).collect()
    }
}

impl std::fmt::Display for HmmModel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "states: {}", self.path_to_string(&(0..self.n_states()).collect::<Vec<_>>()))?;
        writeln!(f, "start: {}", self.labels[self.start] as char)?;
        for s in 0..self.n_states() {
            for t in 0..self.n_states() {
                let p = self.log_transition(s, t);
                if !p.is_zero() {
                    writeln!(f, "t\t{}\t{}\t{}", self.labels[s] as char, self.labels[t] as char, p)?;
                }
            }
        }
        for s in 0..self.n_states() {
            for &sym in self.symbols.iter() {
                let p = self.log_emission(s, sym);
                if !p.is_zero() {
                    writeln!(f, "e\t{}\t{}\t{}", self.labels[s] as char, sym as char, p)?;
                }
            }
        }
        Ok(())
    }
}

fn label_to_string(label: StateLabel) -> String {
    (label as char).to_string()
}

fn validate_table(table: &ProbTable, strict: bool) -> Result<(), HmmError> {
    for (&state, row) in table {
        for (&key, &prob) in row {
            if !(0.0..=1.0).contains(&prob) {
                return Err(HmmError::InvalidModel {
                    state: label_to_string(state),
                    reason: format!("probability {} of `{}` out of range", prob, key as char),
                });
            }
        }
        if strict && !row.is_empty() {
            let sum: f64 = row.values().sum();
            if (sum - 1.0).abs() > SUM_TOLERANCE {
                return Err(HmmError::InvalidModel {
                    state: label_to_string(state),
                    reason: format!("row sums to {} instead of 1", sum),
                });
            }
        }
    }
    Ok(())
}
