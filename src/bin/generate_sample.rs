//! Writes a small sample inflation table for trying the dashboard.
//!
//! ```text
//! cargo run --bin generate_sample                       # inflation_rates.xlsx
//! cargo run --bin generate_sample -- rates.csv          # CSV instead
//! cargo run --bin generate_sample -- rates.parquet      # Parquet instead
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rust_xlsxwriter::Workbook;

/// (country, continent, rate). `None` marks a deliberately unusable rate.
const SAMPLE: &[(&str, &str, Option<f64>)] = &[
    ("Zimbabwe", "Africa", Some(92.1)),
    ("Venezuela", "South America", Some(59.6)),
    ("Sudan", "Africa", Some(56.3)),
    ("Argentina", "South America", Some(41.3)),
    ("Turkey", "Asia", Some(35.9)),
    ("Iran", "Asia", Some(32.5)),
    ("Nigeria", "Africa", Some(25.9)),
    ("Egypt", "Africa", Some(19.7)),
    ("Pakistan", "Asia", Some(7.2)),
    ("Ukraine", "Europe", Some(12.6)),
    ("Russia", "Europe", Some(8.7)),
    ("Ethiopia", "Africa", Some(16.0)),
    ("Ghana", "Africa", Some(14.7)),
    ("Haiti", "North America", Some(22.1)),
    ("Bolivia", "South America", Some(15.1)),
    ("Colombia", "South America", Some(5.1)),
    ("Brazil", "South America", Some(5.2)),
    ("Mexico", "North America", Some(3.8)),
    ("United States", "North America", Some(2.9)),
    ("Canada", "North America", Some(2.0)),
    ("United Kingdom", "Europe", Some(3.4)),
    ("Germany", "Europe", Some(2.2)),
    ("France", "Europe", Some(1.1)),
    ("Italy", "Europe", Some(1.7)),
    ("Switzerland", "Europe", Some(0.1)),
    ("India", "Asia", Some(2.1)),
    ("Japan", "Asia", Some(3.1)),
    ("South Korea", "Asia", Some(2.1)),
    ("China", "Asia", Some(-0.1)),
    ("Thailand", "Asia", Some(-0.3)),
    ("Australia", "Oceania", Some(2.4)),
    ("New Zealand", "Oceania", Some(2.5)),
    ("Fiji", "Oceania", Some(2.3)),
    ("Papua New Guinea", "Oceania", Some(4.6)),
    ("South Africa", "Africa", Some(3.0)),
    ("Kenya", "Africa", Some(4.1)),
    ("Chile", "South America", Some(4.3)),
    ("Peru", "South America", Some(1.7)),
    ("Syria", "Asia", None),
    ("Lebanon", "Asia", None),
    ("Tuvalu", "Oceania", None),
];

fn main() -> Result<()> {
    env_logger::init();

    let output = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("inflation_rates.xlsx"));

    let ext = output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" => write_xlsx(&output)?,
        "csv" => write_csv(&output)?,
        "parquet" | "pq" => write_parquet(&output)?,
        other => bail!("Unsupported output extension: .{other}"),
    }

    let unusable = SAMPLE.iter().filter(|(_, _, rate)| rate.is_none()).count();
    println!(
        "Wrote {} countries ({unusable} with unusable rates) to {}",
        SAMPLE.len(),
        output.display()
    );
    Ok(())
}

const HEADERS: [&str; 4] = ["Rank", "Country", "Continent", "Inflation rate percentage 2025"];

fn write_xlsx(path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, title) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *title)?;
    }
    for (i, (country, continent, rate)) in SAMPLE.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_number(row, 0, (i + 1) as f64)?;
        sheet.write_string(row, 1, *country)?;
        sheet.write_string(row, 2, *continent)?;
        match rate {
            Some(rate) => sheet.write_number(row, 3, *rate)?,
            None => sheet.write_string(row, 3, "n/a")?,
        };
    }
    workbook.save(path).context("saving workbook")?;
    Ok(())
}

fn write_csv(path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record(HEADERS)?;
    for (i, (country, continent, rate)) in SAMPLE.iter().enumerate() {
        let rank = (i + 1).to_string();
        let rate = rate.map(|r| r.to_string()).unwrap_or_else(|| "n/a".to_string());
        writer.write_record([rank.as_str(), *country, *continent, rate.as_str()])?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path) -> Result<()> {
    let ranks = Int64Array::from_iter_values(1..=SAMPLE.len() as i64);
    let countries = StringArray::from_iter_values(SAMPLE.iter().map(|(c, _, _)| *c));
    let continents = StringArray::from_iter_values(SAMPLE.iter().map(|(_, c, _)| *c));
    let rates = Float64Array::from(SAMPLE.iter().map(|(_, _, r)| *r).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new(HEADERS[0], DataType::Int64, false),
        Field::new(HEADERS[1], DataType::Utf8, false),
        Field::new(HEADERS[2], DataType::Utf8, false),
        Field::new(HEADERS[3], DataType::Float64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(ranks),
            Arc::new(countries),
            Arc::new(continents),
            Arc::new(rates),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating Parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}
