use super::types::{AttrValue, Dataset, Fighter};
use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Column holding each fighter's identity
pub const NAME_COLUMN: &str = "name";

/// Load the fighter statistics CSV at `path`.
///
/// The file must have a header row containing a `name` column. Every other
/// column becomes an attribute; cells are typed by [`AttrValue::parse`].
/// Malformed rows and rows without a name are skipped with a warning.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open dataset at {}", path.display()))?;
    read_dataset(file)
        .with_context(|| format!("Failed to load dataset from {}", path.display()))
}

/// Read a fighter table from any CSV source
pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns: Vec<String> = rdr
        .headers()
        .context("Failed to read CSV header")?
        .iter()
        .map(|s| s.to_string())
        .collect();

    let name_idx = columns
        .iter()
        .position(|c| c == NAME_COLUMN)
        .ok_or_else(|| anyhow!("Dataset has no '{}' column", NAME_COLUMN))?;

    let mut fighters = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        // +2: one for the header, one for 1-based line numbers
        let line = idx + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(line, "Skipping malformed row: {}", e);
                continue;
            }
        };

        let name = record.get(name_idx).unwrap_or_default();
        if name.is_empty() {
            warn!(line, "Skipping row without a name");
            continue;
        }

        let attributes = columns
            .iter()
            .zip(record.iter())
            .enumerate()
            .filter(|(i, _)| *i != name_idx)
            .map(|(_, (column, cell))| (column.clone(), AttrValue::parse(cell)))
            .collect();

        fighters.push(Fighter {
            name: name.to_string(),
            attributes,
        });
    }

    info!(
        rows = fighters.len(),
        columns = columns.len(),
        "Loaded fighter dataset"
    );

    Ok(Dataset { columns, fighters })
}
