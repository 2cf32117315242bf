//! JSON export of filtered views and continent aggregates.
//!
//! Exported records use the object-row layout `load_file` reads, so a saved
//! view can be opened again as a dataset.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use super::model::CountryInflationRecord;
use super::stats::ContinentStats;

/// Write records as a JSON array of `{rank, country, continent, rate}` objects.
pub fn write_records_json<'a, W: Write>(
    records: impl IntoIterator<Item = &'a CountryInflationRecord>,
    writer: W,
) -> Result<usize> {
    let records: Vec<&CountryInflationRecord> = records.into_iter().collect();
    serde_json::to_writer_pretty(writer, &records).context("Failed to write records JSON")?;
    Ok(records.len())
}

/// Write continent aggregates as a JSON array.
pub fn write_continent_stats_json<W: Write>(stats: &[ContinentStats], writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, stats).context("Failed to write continent stats JSON")
}

/// Save a view to `path`. Returns the number of records written.
pub fn export_records<'a>(
    path: &Path,
    records: impl IntoIterator<Item = &'a CountryInflationRecord>,
) -> Result<usize> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create export file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let written = write_records_json(records, &mut writer)?;
    writer.flush().context("Failed to flush export file")?;

    log::info!("Exported {written} countries to {}", path.display());
    Ok(written)
}

/// Save continent aggregates to `path`.
pub fn export_continent_stats(path: &Path, stats: &[ContinentStats]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create export file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_continent_stats_json(stats, &mut writer)?;
    writer.flush().context("Failed to flush export file")?;

    log::info!("Exported {} continents to {}", stats.len(), path.display());
    Ok(())
}
