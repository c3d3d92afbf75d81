//! Serialization of the run's two artifacts: the city-index JSON and the
//! fixed-schema spreadsheet.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::models::{CityUrlIndex, PropertyRecord, FIELD_HEADERS};
use crate::text::sanitize_cell;

const INDEX_PREFIX: &str = "urls_";
const INDEX_SUFFIX: &str = "_por_cidade.json";

/// Write the intermediate city -> URLs artifact. This file survives a later
/// failure of the detail phase and is what `wp-sync` uploads.
pub fn write_city_index(dir: &Path, region: &str, index: &CityUrlIndex) -> Result<PathBuf> {
    let path = dir.join(format!(
        "{INDEX_PREFIX}{}{INDEX_SUFFIX}",
        region.to_lowercase()
    ));
    let json = serde_json::to_string_pretty(index)?;
    fs::write(&path, json)
        .with_context(|| format!("Failed to write city index to {}", path.display()))?;
    info!("Saved city index for {} cities to {}", index.len(), path.display());
    Ok(path)
}

/// Write all records as one sheet. Every row carries exactly the fixed
/// column set in the fixed order regardless of which fields a detail page
/// populated; cell values are flattened just before writing.
pub fn write_spreadsheet(dir: &Path, region: &str, records: &[PropertyRecord]) -> Result<PathBuf> {
    let path = dir.join(format!("imoveis_{}.csv", region.to_lowercase()));
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("Failed to create spreadsheet at {}", path.display()))?;

    writer.write_record(FIELD_HEADERS)?;
    for record in records {
        writer.write_record(record.to_row().iter().map(|v| sanitize_cell(v)))?;
    }
    writer.flush()?;

    info!("Saved {} properties to {}", records.len(), path.display());
    Ok(path)
}

/// Newest city-index file in `dir` by modification time, matching the
/// `urls_*_por_cidade.json` naming convention. `Ok(None)` when none exists.
pub fn latest_index_file(dir: &Path) -> Result<Option<PathBuf>> {
    let mut newest: Option<(std::time::SystemTime, PathBuf)> = None;

    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to list directory {}", dir.display()))?
    {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !name.starts_with(INDEX_PREFIX) || !name.ends_with(INDEX_SUFFIX) {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        if newest.as_ref().map_or(true, |(t, _)| modified > *t) {
            newest = Some((modified, entry.path()));
        }
    }

    Ok(newest.map(|(_, path)| path))
}
