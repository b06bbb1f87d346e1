//! Dataset I/O.
//!
//! Each entity is serialized as a pretty-printed JSON array of flat
//! objects (UTF-8), one file per entity with a fixed filename under the
//! configured data directory. The cleaner works on the generic tabular
//! form (`Table`) read back from those files, not on the typed records.

use crate::error::{PipelineError, PipelineResult};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

pub const CUSTOMERS_FILE: &str = "customers.json";
pub const POLICIES_FILE: &str = "policies.json";
pub const CLAIMS_FILE: &str = "claims.json";
pub const RISK_INDICATORS_FILE: &str = "risk_indicators.json";

/// One flat record, column name → cell value.
pub type Row = serde_json::Map<String, Value>;

/// A whole dataset held in memory. The pipeline is batch-only: no
/// streaming, no row-at-a-time processing.
pub type Table = Vec<Row>;

/// The four raw datasets as ingested from the data directory.
pub struct RawDatasets {
    pub customers: Table,
    pub policies: Table,
    pub claims: Table,
    pub risk_indicators: Table,
}

/// Serialize one dataset to `<dir>/<filename>`, creating the directory
/// if needed.
pub fn save_json<T: Serialize>(records: &[T], dir: &str, filename: &str) -> PipelineResult<()> {
    std::fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(Path::new(dir).join(filename), json)?;
    Ok(())
}

/// Read one dataset back as a generic table.
pub fn load_table(dir: &str, filename: &str) -> PipelineResult<Table> {
    let path = Path::new(dir).join(filename);
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(PipelineError::DatasetNotFound {
                name: filename.to_string(),
                dir: dir.to_string(),
            })
        }
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_str(&content)?)
}

/// Read all four datasets from the data directory.
pub fn ingest(dir: &str) -> PipelineResult<RawDatasets> {
    Ok(RawDatasets {
        customers: load_table(dir, CUSTOMERS_FILE)?,
        policies: load_table(dir, POLICIES_FILE)?,
        claims: load_table(dir, CLAIMS_FILE)?,
        risk_indicators: load_table(dir, RISK_INDICATORS_FILE)?,
    })
}
