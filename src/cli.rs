//!
//! subcommand bodies of the decode binary
//!
use crate::common::{sequence_to_string, Sequence, StateLabel, START_OBS};
use crate::hmm::mocks::mock_membrane;
use crate::hmm::model::HmmModel;
use crate::io;
use log::{info, warn};

///
/// Load a model table file, or fall back to the built-in membrane
/// model.
///
pub fn load_model(model_json: Option<&str>) -> HmmModel {
    match model_json {
        Some(path) => {
            info!("loading model tables from {}", path);
            io::json::read_model(path)
                .unwrap_or_else(|e| panic!("cannot load model {}: {}", path, e))
        }
        None => {
            info!("using the built-in membrane model");
            mock_membrane()
        }
    }
}

///
/// Decode every record of a FASTA file, reporting each Viterbi path
/// and its log-odds ratio against the single-state alternative path.
///
pub fn decode(fasta: &str, model_json: Option<&str>, filter: Option<&str>, alt_state: StateLabel) {
    let model = load_model(model_json);
    let mut n_decoded = 0;
    for (annotation, seq) in io::fasta::parse_named_seqs(fasta) {
        if let Some(pattern) = filter {
            if !annotation.contains(pattern) {
                continue;
            }
        }
        decode_one(&model, &annotation, &seq, alt_state);
        n_decoded += 1;
    }
    info!("decoded {} records", n_decoded);
}

fn decode_one(model: &HmmModel, annotation: &str, seq: &[u8], alt_state: StateLabel) {
    // align the start sentinel with the start state
    let mut obs = Sequence::with_capacity(seq.len() + 1);
    obs.push(START_OBS);
    obs.extend_from_slice(seq);

    let decoded = match model.viterbi(&obs) {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!("{}: {}", annotation, e);
            return;
        }
    };

    // alternative hypothesis: the whole sequence in one state
    let mut alt: Sequence = vec![alt_state; obs.len()];
    alt[0] = model.label(model.start());
    let p_alt = model.evaluate(&alt, &obs).unwrap();

    println!(">{}", annotation);
    println!("sequence: {}", sequence_to_string(seq));
    println!("viterbi:  {}", model.path_to_string(&decoded.path));
    println!("log P(viterbi) = {:.4}", decoded.p.to_log_value());
    println!(
        "log P(all `{}`) = {:.4}",
        alt_state as char,
        p_alt.to_log_value()
    );
    println!(
        "odds ratio = {:.4e}",
        (decoded.p.to_log_value() - p_alt.to_log_value()).exp()
    );
    println!();
}
