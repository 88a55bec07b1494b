//!
//! Mock models for testing
//!
use super::model::{HmmModel, ProbRow, ProbTable};
use crate::common::START_OBS;

fn row(entries: &[(u8, f64)]) -> ProbRow {
    entries.iter().copied().collect()
}

///
/// The occasionally dishonest casino: a fair die `F` (uniform 1..6)
/// and a loaded die `L` (a six half of the time), start state `S`.
///
pub fn mock_casino() -> HmmModel {
    let mut transition = ProbTable::new();
    transition.insert(b'S', row(&[(b'F', 0.5), (b'L', 0.5)]));
    transition.insert(b'F', row(&[(b'F', 0.95), (b'L', 0.05)]));
    transition.insert(b'L', row(&[(b'L', 0.90), (b'F', 0.10)]));
    let mut emission = ProbTable::new();
    emission.insert(b'S', row(&[(START_OBS, 1.0)]));
    emission.insert(
        b'F',
        row(&[
            (b'1', 1.0 / 6.0),
            (b'2', 1.0 / 6.0),
            (b'3', 1.0 / 6.0),
            (b'4', 1.0 / 6.0),
            (b'5', 1.0 / 6.0),
            (b'6', 1.0 / 6.0),
        ]),
    );
    emission.insert(
        b'L',
        row(&[
            (b'1', 1.0 / 10.0),
            (b'2', 1.0 / 10.0),
            (b'3', 1.0 / 10.0),
            (b'4', 1.0 / 10.0),
            (b'5', 1.0 / 10.0),
            (b'6', 1.0 / 2.0),
        ]),
    );
    HmmModel::from_tables_strict(b'S', &transition, &emission).unwrap()
}

///
/// Two-state membrane model over nucleotide-coded residues:
/// `+` inside the membrane, `-` outside, start state `S`.
///
pub fn mock_membrane() -> HmmModel {
    let mut transition = ProbTable::new();
    transition.insert(b'S', row(&[(b'+', 0.5), (b'-', 0.5)]));
    transition.insert(b'+', row(&[(b'+', 0.85), (b'-', 0.15)]));
    transition.insert(b'-', row(&[(b'-', 0.95), (b'+', 0.05)]));
    let mut emission = ProbTable::new();
    emission.insert(b'S', row(&[(START_OBS, 1.0)]));
    emission.insert(
        b'+',
        row(&[(b'A', 0.35), (b'C', 0.20), (b'G', 0.10), (b'T', 0.35)]),
    );
    emission.insert(
        b'-',
        row(&[(b'A', 0.10), (b'C', 0.40), (b'G', 0.40), (b'T', 0.10)]),
    );
    HmmModel::from_tables_strict(b'S', &transition, &emission).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mocks_are_well_formed() {
        let casino = mock_casino();
        assert_eq!(casino.labels(), b"FLS");
        let membrane = mock_membrane();
        assert_eq!(membrane.labels(), b"+-S");
        assert_eq!(membrane.n_symbols(), 5);
    }
}
