//!
//! JSON model tables
//!
//! On-disk form of a model: `{ "start": "S", "transition": {state ->
//! {state -> prob}}, "emission": {state -> {symbol -> prob}} }` with
//! every label a single-byte string. The core only sees the registered
//! `HmmModel` built from it.
//!
use crate::hmm::model::{HmmModel, ProbTable};
use crate::hmm::HmmError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

type NominalTable = BTreeMap<String, BTreeMap<String, f64>>;

///
/// Serialized probability tables of one model.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelJson {
    pub start: String,
    pub transition: NominalTable,
    pub emission: NominalTable,
}

///
/// Everything that can go wrong between a table file and a validated
/// model.
///
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("model file io: {0}")]
    Io(#[from] std::io::Error),
    #[error("model file syntax: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Model(#[from] HmmError),
    #[error("label `{0}` is not a single byte")]
    BadLabel(String),
}

fn to_byte(label: &str) -> Result<u8, ModelLoadError> {
    match label.as_bytes() {
        [byte] => Ok(*byte),
        _ => Err(ModelLoadError::BadLabel(label.to_string())),
    }
}

fn to_table(nominal: &NominalTable) -> Result<ProbTable, ModelLoadError> {
    let mut table = ProbTable::new();
    for (state, row) in nominal {
        let mut bytes = BTreeMap::new();
        for (key, &prob) in row {
            bytes.insert(to_byte(key)?, prob);
        }
        table.insert(to_byte(state)?, bytes);
    }
    Ok(table)
}

impl ModelJson {
    ///
    /// Build the strict-validated model the tables describe.
    ///
    pub fn to_model(&self) -> Result<HmmModel, ModelLoadError> {
        let start = to_byte(&self.start)?;
        let transition = to_table(&self.transition)?;
        let emission = to_table(&self.emission)?;
        Ok(HmmModel::from_tables_strict(start, &transition, &emission)?)
    }
}

///
/// Read a model from a JSON table file.
///
pub fn read_model(filename: &str) -> Result<HmmModel, ModelLoadError> {
    let json = std::fs::read_to_string(filename)?;
    let tables: ModelJson = serde_json::from_str(&json)?;
    tables.to_model()
}

///
/// Write model tables as pretty-printed JSON.
///
pub fn write_model(filename: &str, tables: &ModelJson) -> std::io::Result<()> {
    crate::io::write_string(filename, &serde_json::to_string_pretty(tables).unwrap())
}
