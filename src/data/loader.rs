use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use calamine::{Data, Ods, Reader, Xls, Xlsx};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{
    Cell, CountryInflationRecord, Dataset, DropReason, DroppedRow, LoadReport, Rank,
};
use crate::error::DatasetError;

/// Every source table carries exactly these four columns, in this order:
/// rank, country, continent, rate.
pub const COLUMN_COUNT: usize = 4;

/// Header keywords (lower-case substrings) accepted for each positional column.
const EXPECTED_HEADERS: [(&str, &[&str]); COLUMN_COUNT] = [
    ("rank", &["rank"]),
    ("country", &["country", "nation"]),
    ("continent", &["continent", "region"]),
    ("rate", &["rate", "inflation", "%"]),
];

/// How much to trust the header row.
///
/// Columns are always mapped by position. `Positional` only warns when a
/// header looks like it belongs to a different column; `Strict` refuses the
/// file instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderPolicy {
    #[default]
    Positional,
    Strict,
}

/// Raw rows straight out of a file, before any cleaning.
struct RawTable {
    /// `None` for sources without a header row (JSON arrays of arrays).
    headers: Option<Vec<String>>,
    rows: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, Copy)]
enum Format {
    Csv,
    Json,
    Parquet,
    Xlsx,
    Xls,
    Ods,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an inflation table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, then `rank,country,continent,rate`
/// * `.json`    – `[[rank, country, continent, rate], ...]` or an array of
///   four-field objects (fields taken in document order)
/// * `.parquet` – four top-level columns
/// * `.xlsx` / `.xlsm` / `.xls` / `.ods` – first sheet, header in its first row
///
/// Rows whose rate is not a finite number are dropped, as are repeats of a
/// country already seen (first row wins). Both are listed in the returned
/// dataset's [`LoadReport`].
pub fn load_file(path: &Path, policy: HeaderPolicy) -> Result<Dataset, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Unavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let format = match ext.as_str() {
        "csv" => Format::Csv,
        "json" => Format::Json,
        "parquet" | "pq" => Format::Parquet,
        "xlsx" | "xlsm" => Format::Xlsx,
        "xls" => Format::Xls,
        "ods" => Format::Ods,
        other => {
            return Err(DatasetError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: other.to_string(),
            })
        }
    };

    let table = match format {
        Format::Csv => read_csv(BufReader::new(file)),
        Format::Json => read_json(BufReader::new(file)),
        Format::Parquet => read_parquet(file),
        Format::Xlsx => read_workbook::<Xlsx<BufReader<File>>>(BufReader::new(file)),
        Format::Xls => read_workbook::<Xls<BufReader<File>>>(BufReader::new(file)),
        Format::Ods => read_workbook::<Ods<BufReader<File>>>(BufReader::new(file)),
    }
    .map_err(|e| DatasetError::malformed(path, &e))?;

    match &table.headers {
        Some(headers) => {
            check_headers(headers, policy).map_err(|e| DatasetError::malformed(path, &e))?
        }
        None => log::debug!(
            "{}: no header row, mapping columns by position",
            path.display()
        ),
    }

    let dataset = build_dataset(path, table);
    log::info!(
        "Loaded {} countries from {} ({} rows read, {} dropped)",
        dataset.len(),
        path.display(),
        dataset.report().rows_read,
        dataset.report().dropped.len()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Cleaning: raw rows → typed records
// ---------------------------------------------------------------------------

fn build_dataset(path: &Path, table: RawTable) -> Dataset {
    let mut report = LoadReport {
        source: path.to_path_buf(),
        rows_read: table.rows.len(),
        dropped: Vec::new(),
    };
    let mut seen: HashSet<String> = HashSet::new();
    let mut records = Vec::with_capacity(table.rows.len());

    for (row, cells) in table.rows.iter().enumerate() {
        let [rank, country, continent, rate] = cells.as_slice() else {
            // Readers only ever produce four-cell rows.
            continue;
        };

        let Some(rate) = rate.as_rate() else {
            log::debug!("row {row}: dropping unparseable rate '{rate}'");
            report.dropped.push(DroppedRow {
                row,
                reason: DropReason::UnparseableRate(rate.to_label()),
            });
            continue;
        };

        let country = country.to_label();
        if !seen.insert(country.clone()) {
            log::warn!("row {row}: duplicate country '{country}', keeping the first occurrence");
            report.dropped.push(DroppedRow {
                row,
                reason: DropReason::DuplicateCountry(country),
            });
            continue;
        }

        records.push(CountryInflationRecord {
            rank: Rank::from(rank),
            country,
            continent: continent.to_label(),
            rate,
        });
    }

    Dataset::new(records, report)
}

/// Compare header text against the positional contract.
fn check_headers(headers: &[String], policy: HeaderPolicy) -> Result<()> {
    let mismatches: Vec<String> = headers
        .iter()
        .zip(EXPECTED_HEADERS.iter())
        .filter(|(header, (_, keywords))| {
            let lower = header.to_lowercase();
            !keywords.iter().any(|k| lower.contains(*k))
        })
        .map(|(header, (column, _))| format!("'{header}' in the {column} position"))
        .collect();

    if mismatches.is_empty() {
        return Ok(());
    }
    match policy {
        HeaderPolicy::Positional => {
            log::warn!(
                "unexpected headers ({}); mapping columns by position anyway",
                mismatches.join(", ")
            );
            Ok(())
        }
        HeaderPolicy::Strict => bail!("unexpected headers: {}", mismatches.join(", ")),
    }
}

fn ensure_width(found: usize, what: &str) -> Result<()> {
    if found != COLUMN_COUNT {
        bail!("{what}: expected {COLUMN_COUNT} columns, found {found}");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// CSV layout: one header row, then four fields per record. Every field is
/// kept as text; typing happens during cleaning.
fn read_csv<R: Read>(reader: R) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    ensure_width(headers.len(), "CSV header")?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        ensure_width(record.len(), &format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(|v| Cell::Text(v.to_string())).collect());
    }

    Ok(RawTable {
        headers: Some(headers),
        rows,
    })
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Accepted shapes:
///
/// ```json
/// [[1, "Zimbabwe", "Africa", 91.7], ...]
/// [{"Rank": 1, "Country": "Zimbabwe", "Continent": "Africa", "Rate": 91.7}, ...]
/// ```
///
/// Object keys of the first object row act as the header; later object rows
/// are read by those keys, whatever their own field order.
fn read_json<R: Read>(reader: R) -> Result<RawTable> {
    let root: JsonValue = serde_json::from_reader(reader).context("parsing JSON")?;
    let rows_json = root.as_array().context("Expected top-level JSON array")?;

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::with_capacity(rows_json.len());

    for (i, row) in rows_json.iter().enumerate() {
        let cells: Vec<Cell> = match row {
            JsonValue::Array(values) => values.iter().map(json_to_cell).collect(),
            JsonValue::Object(obj) => {
                let keys = headers.get_or_insert_with(|| obj.keys().cloned().collect());
                ensure_width(obj.len(), &format!("JSON row {i}"))?;
                keys.iter()
                    .map(|key| {
                        obj.get(key)
                            .map(json_to_cell)
                            .with_context(|| format!("JSON row {i}: missing field '{key}'"))
                    })
                    .collect::<Result<Vec<_>>>()?
            }
            other => bail!("Row {i} is neither an array nor an object: {other}"),
        };
        ensure_width(cells.len(), &format!("JSON row {i}"))?;
        rows.push(cells);
    }

    Ok(RawTable { headers, rows })
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::String(s) => Cell::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Cell::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Cell::Float(f)
            } else {
                Cell::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => Cell::Bool(*b),
        JsonValue::Null => Cell::Null,
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Expected schema: four top-level columns, each one of Utf8/LargeUtf8,
/// Int32/Int64, Float32/Float64, Boolean or Null. Works with files written by
/// Pandas (`df.to_parquet()`) and Polars (`df.write_parquet()`).
fn read_parquet(file: File) -> Result<RawTable> {
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    ensure_width(headers.len(), "Parquet schema")?;

    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .zip(&headers)
                .map(|(col, name)| {
                    extract_cell(col, row)
                        .with_context(|| format!("Row {}: column '{name}'", rows.len()))
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(cells);
        }
    }

    Ok(RawTable {
        headers: Some(headers),
        rows,
    })
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> Result<Cell> {
    if col.is_null(row) {
        return Ok(Cell::Null);
    }
    let cell = match col.data_type() {
        DataType::Null => Cell::Null,
        DataType::Utf8 => Cell::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Cell::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => Cell::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => Cell::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => Cell::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => Cell::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => Cell::Bool(col.as_boolean().value(row)),
        other => bail!("unsupported column type {other:?}"),
    };
    Ok(cell)
}

// ---------------------------------------------------------------------------
// Workbook reader
// ---------------------------------------------------------------------------

/// Spreadsheets (the published table ships as `inflation_rates.xlsx`). Only
/// the first sheet is read; its first row is the header.
fn read_workbook<W>(reader: BufReader<File>) -> Result<RawTable>
where
    W: Reader<BufReader<File>>,
    W::Error: std::error::Error + Send + Sync + 'static,
{
    let mut workbook = W::new(reader).context("opening workbook")?;
    let range = workbook
        .worksheet_range_at(0)
        .context("workbook has no sheets")?
        .context("reading first sheet")?;

    let mut sheet_rows = range.rows();
    let headers: Vec<String> = sheet_rows
        .next()
        .context("first sheet is empty")?
        .iter()
        .map(|c| c.to_string().trim().to_string())
        .collect();
    ensure_width(headers.len(), "sheet header")?;

    let rows = sheet_rows
        .map(|row| row.iter().map(workbook_cell).collect())
        .collect();

    Ok(RawTable {
        headers: Some(headers),
        rows,
    })
}

fn workbook_cell(data: &Data) -> Cell {
    match data {
        Data::Int(i) => Cell::Integer(*i),
        Data::Float(v) => Cell::Float(*v),
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Bool(*b),
        Data::Empty => Cell::Null,
        // Dates and error cells (`#N/A`, ...) keep their text.
        other => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::ErrorKind;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("temp file");
        file.write_all(content.as_bytes()).expect("write temp file");
        file
    }

    const SCENARIO_CSV: &str = "\
Rank,Country,Continent,Inflation rate percentage 2025
1,A,X,5.0
2,B,X,3.0
3,C,Y,bad
";

    #[test]
    fn drops_unparseable_rates_and_keeps_order() {
        let file = write_temp(".csv", SCENARIO_CSV);
        let ds = load_file(file.path(), HeaderPolicy::Strict).unwrap();

        let names: Vec<&str> = ds.records().iter().map(|r| r.country.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(ds.records()[0].rate, 5.0);
        assert_eq!(ds.records()[0].rank, Rank::Position(1));
        assert_eq!(ds.report().rows_read, 3);
        assert_eq!(
            ds.report().dropped,
            vec![DroppedRow {
                row: 2,
                reason: DropReason::UnparseableRate("bad".into()),
            }]
        );
        assert!(ds.notice().is_none());
    }

    #[test]
    fn n_valid_plus_m_invalid_rows_yields_n_records() {
        let mut csv = String::from("rank,country,continent,rate\n");
        for i in 0..7 {
            csv.push_str(&format!("{i},Valid{i},Europe,{}.5\n", i));
        }
        for (i, bad) in ["", "n/a", "inf", "NaN", "12%"].iter().enumerate() {
            csv.push_str(&format!("{},Invalid{i},Asia,{bad}\n", 100 + i));
        }
        let file = write_temp(".csv", &csv);
        let ds = load_file(file.path(), HeaderPolicy::Positional).unwrap();
        assert_eq!(ds.len(), 7);
        assert_eq!(ds.report().dropped_unparseable(), 5);
    }

    #[test]
    fn duplicate_country_keeps_first_row() {
        let csv = "rank,country,continent,rate\n1,A,X,9.0\n2,B,X,3.0\n3,A,Y,1.0\n";
        let file = write_temp(".csv", csv);
        let ds = load_file(file.path(), HeaderPolicy::Positional).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rate_of("A"), Some(9.0));
        assert_eq!(
            ds.report().dropped[0].reason,
            DropReason::DuplicateCountry("A".into())
        );
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("inflation_rates.csv"), HeaderPolicy::Positional)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }

    #[test]
    fn wrong_column_count_is_malformed() {
        let file = write_temp(".csv", "rank,country,rate\n1,A,5.0\n");
        let err = load_file(file.path(), HeaderPolicy::Positional).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);

        let file = write_temp(".csv", "rank,country,continent,rate\n1,A,X,5.0\n2,B,X\n");
        let err = load_file(file.path(), HeaderPolicy::Positional).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn unknown_extension_is_malformed() {
        let file = write_temp(".numbers", "not a table we can read");
        let err = load_file(file.path(), HeaderPolicy::Positional).unwrap_err();
        assert!(matches!(err, DatasetError::UnsupportedFormat { .. }));
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    fn write_xlsx(path: &Path, rows: &[(&str, &str, &str, Option<f64>)]) {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, title) in ["Rank", "Country", "Continent", "Inflation rate percentage 2025"]
            .iter()
            .enumerate()
        {
            sheet.write_string(0, col as u16, *title).unwrap();
        }
        for (i, (country, continent, raw, rate)) in rows.iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write_number(row, 0, (i + 1) as f64).unwrap();
            sheet.write_string(row, 1, *country).unwrap();
            sheet.write_string(row, 2, *continent).unwrap();
            match rate {
                Some(rate) => sheet.write_number(row, 3, *rate).unwrap(),
                None => sheet.write_string(row, 3, *raw).unwrap(),
            };
        }
        workbook.save(path).unwrap();
    }

    #[test]
    fn xlsx_first_sheet_is_read_like_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inflation_rates.xlsx");
        write_xlsx(
            &path,
            &[
                ("A", "X", "", Some(5.0)),
                ("B", "X", "", Some(3.0)),
                ("C", "Y", "bad", None),
            ],
        );

        let from_xlsx = load_file(&path, HeaderPolicy::Strict).unwrap();
        let csv = write_temp(".csv", SCENARIO_CSV);
        let from_csv = load_file(csv.path(), HeaderPolicy::Strict).unwrap();

        assert_eq!(from_xlsx.records(), from_csv.records());
        assert_eq!(from_xlsx.records()[0].rank, Rank::Position(1));
        assert_eq!(from_xlsx.report().rows_read, 3);
        assert_eq!(
            from_xlsx.report().dropped,
            vec![DroppedRow {
                row: 2,
                reason: DropReason::UnparseableRate("bad".into()),
            }]
        );
    }

    #[test]
    fn broken_workbook_is_malformed() {
        let file = write_temp(".xlsx", "not really a spreadsheet");
        let err = load_file(file.path(), HeaderPolicy::Positional).unwrap_err();
        assert!(matches!(err, DatasetError::Malformed { .. }));
    }

    #[test]
    fn header_policy_controls_mismatched_headers() {
        let csv = "Country,Rank,Continent,Rate\nA,1,X,5.0\n";
        let file = write_temp(".csv", csv);

        let ds = load_file(file.path(), HeaderPolicy::Positional).unwrap();
        // Positional mapping: the first column is still read as the rank.
        assert_eq!(ds.records()[0].rank, Rank::Label("A".into()));
        assert_eq!(ds.records()[0].country, "1");

        let err = load_file(file.path(), HeaderPolicy::Strict).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
        assert!(err.to_string().contains("'Country' in the rank position"));
    }

    #[test]
    fn json_array_and_object_rows() {
        let json = r#"[
            [1, "A", "X", 5.0],
            {"Rank": 2, "Country": "B", "Continent": "X", "Rate": "3.0"},
            [3, "C", "Y", null],
            [4, "D", "Y", 7]
        ]"#;
        let file = write_temp(".json", json);
        let ds = load_file(file.path(), HeaderPolicy::Strict).unwrap();
        let rates: Vec<(String, f64)> = ds
            .records()
            .iter()
            .map(|r| (r.country.clone(), r.rate))
            .collect();
        assert_eq!(
            rates,
            vec![("A".into(), 5.0), ("B".into(), 3.0), ("D".into(), 7.0)]
        );
    }

    #[test]
    fn json_object_rows_follow_the_first_rows_keys() {
        let json = r#"[
            {"rank": 1, "country": "A", "continent": "X", "rate": 5.0},
            {"rate": 3.0, "continent": "Y", "country": "B", "rank": 2}
        ]"#;
        let file = write_temp(".json", json);
        let ds = load_file(file.path(), HeaderPolicy::Strict).unwrap();
        assert_eq!(
            ds.records()[1],
            CountryInflationRecord::new(Rank::Position(2), "B", "Y", 3.0)
        );

        let json = r#"[
            {"rank": 1, "country": "A", "continent": "X", "rate": 5.0},
            {"rank": 2, "nation": "B", "continent": "Y", "rate": 3.0}
        ]"#;
        let file = write_temp(".json", json);
        let err = load_file(file.path(), HeaderPolicy::Positional).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
        assert!(err.to_string().contains("missing field 'country'"));
    }

    #[test]
    fn json_wrong_shape_is_malformed() {
        let file = write_temp(".json", r#"{"rows": []}"#);
        let err = load_file(file.path(), HeaderPolicy::Positional).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);

        let file = write_temp(".json", r#"[[1, "A", "X"]]"#);
        let err = load_file(file.path(), HeaderPolicy::Positional).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }
}
