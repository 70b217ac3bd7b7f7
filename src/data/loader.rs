use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{BinarizationFlags, DataPoint};
use crate::error::ModalityError;

/// Maximum number of cells a row may carry: three measurements, three flags.
const MAX_COLUMNS: usize = 6;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load measurements and binarization flags from a headerless CSV file.
///
/// Layout per row (comma delimited, up to six cells):
/// * cells 1–3: one measurement per modality, blank → `0.0`
/// * cells 4–6: presence flag per modality, blank → `false`, anything else → `true`
///
/// Missing trailing cells count as blank.
pub fn load_csv(path: &Path) -> Result<(Vec<DataPoint>, Vec<BinarizationFlags>)> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    let (data, binarization) = load_reader(file)?;
    log::info!("Loaded {} rows from {}", data.len(), path.display());
    Ok((data, binarization))
}

/// Same as [`load_csv`] for any byte source.
pub fn load_reader<R: Read>(reader: R) -> Result<(Vec<DataPoint>, Vec<BinarizationFlags>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut data = Vec::new();
    let mut binarization = Vec::new();

    for (index, result) in reader.records().enumerate() {
        let row_no = index + 1;
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        if record.len() > MAX_COLUMNS {
            return Err(ModalityError::TooManyColumns {
                row: row_no,
                found: record.len(),
            }
            .into());
        }

        let mut point: DataPoint = [0.0; 3];
        for (col, slot) in point.iter_mut().enumerate() {
            *slot = parse_measurement(record.get(col).unwrap_or(""), row_no, col)?;
        }

        let mut flags: BinarizationFlags = [false; 3];
        for (col, slot) in flags.iter_mut().enumerate() {
            *slot = record.get(col + 3).is_some_and(|cell| !cell.is_empty());
        }

        data.push(point);
        binarization.push(flags);
    }

    Ok((data, binarization))
}

/// Write rows back in the loader's layout. Flags become `1` or an empty cell.
pub fn write_csv<W: Write>(
    writer: W,
    data: &[DataPoint],
    binarization: &[BinarizationFlags],
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    for (point, flags) in data.iter().zip(binarization.iter()) {
        let mut cells: Vec<String> = point.iter().map(|v| v.to_string()).collect();
        cells.extend(
            flags
                .iter()
                .map(|&set| if set { "1".to_string() } else { String::new() }),
        );
        writer.write_record(&cells).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV writer")?;
    Ok(())
}

fn parse_measurement(cell: &str, row: usize, col: usize) -> Result<f64> {
    if cell.is_empty() {
        return Ok(0.0);
    }
    cell.trim()
        .parse::<f64>()
        .with_context(|| format!("Row {row}, column {}: '{cell}' is not a number", col + 1))
}
