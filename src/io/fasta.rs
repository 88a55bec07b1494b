//!
//! FASTA adapter for observed sequences
//!
//! The decoder itself never parses formats; this is the thin boundary
//! to the `bio` reader, with the cleanup the flat teaching files need
//! (embedded digits, `*`, stray whitespace).
//!
use crate::common::Sequence;
use bio::io::fasta;
use log::warn;

///
/// Uppercase the residues and drop sequence-numbering junk.
///
pub fn sanitize_residues(seq: &[u8]) -> Sequence {
    seq.iter()
        .enumerate()
        .filter_map(|(i, &base)| match base {
            b'0'..=b'9' | b'*' | b' ' | b'\t' => None,
            b'a'..=b'z' => Some(base.to_ascii_uppercase()),
            b'A'..=b'Z' => Some(base),
            c => {
                warn!("informal residue `{}` in bases[{}] kept as-is", c as char, i);
                Some(c)
            }
        })
        .collect()
}

///
/// Parse `(header, sequence)` records of a FASTA file.
///
pub fn parse_named_seqs(filename: &str) -> Vec<(String, Sequence)> {
    let reader = fasta::Reader::from_file(filename).unwrap();
    let mut seqs = Vec::new();
    for result in reader.records() {
        let record = result.unwrap();
        let name = match record.desc() {
            Some(desc) => format!("{} {}", record.id(), desc),
            None => record.id().to_string(),
        };
        seqs.push((name, sanitize_residues(record.seq())));
    }
    seqs
}
