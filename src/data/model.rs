use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{DatasetError, ErrorKind};

// ---------------------------------------------------------------------------
// Cell – a single raw value as read from the source table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell, only alive between reading a file and building
/// records from it.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Null => write!(f, "<null>"),
        }
    }
}

impl Cell {
    /// Interpret the cell as an inflation rate.
    ///
    /// Only finite numbers qualify: `inf`, `NaN`, empty text, nulls and
    /// booleans are all unparseable.
    pub fn as_rate(&self) -> Option<f64> {
        let v = match self {
            Cell::Float(v) => *v,
            Cell::Integer(i) => *i as f64,
            Cell::Text(s) => s.trim().parse::<f64>().ok()?,
            Cell::Bool(_) | Cell::Null => return None,
        };
        // `-0.0` folds into `0.0`.
        v.is_finite().then_some(v + 0.0)
    }

    /// Text content with surrounding whitespace removed; numbers are rendered.
    pub fn to_label(&self) -> String {
        match self {
            Cell::Text(s) => s.trim().to_string(),
            Cell::Null => String::new(),
            other => other.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// CountryInflationRecord – one row of the cleaned table
// ---------------------------------------------------------------------------

/// Source rank of a country. Carried through for display, never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Rank {
    Position(i64),
    Label(String),
    Unranked,
}

impl From<&Cell> for Rank {
    fn from(cell: &Cell) -> Self {
        match cell {
            Cell::Integer(i) => Rank::Position(*i),
            Cell::Float(v) => match whole_number(*v) {
                Some(i) => Rank::Position(i),
                None => Rank::Label(cell.to_label()),
            },
            Cell::Null => Rank::Unranked,
            other => {
                let label = other.to_label();
                if label.is_empty() {
                    return Rank::Unranked;
                }
                let position = label
                    .parse::<i64>()
                    .ok()
                    .or_else(|| label.parse::<f64>().ok().and_then(whole_number));
                match position {
                    Some(i) => Rank::Position(i),
                    None => Rank::Label(label),
                }
            }
        }
    }
}

/// `v` as an integer when it is finite, has no fractional part and fits.
fn whole_number(v: f64) -> Option<i64> {
    let in_range = v >= i64::MIN as f64 && v < i64::MAX as f64;
    (v.is_finite() && v.fract() == 0.0 && in_range).then_some(v as i64)
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Position(i) => write!(f, "{i}"),
            Rank::Label(s) => write!(f, "{s}"),
            Rank::Unranked => write!(f, "-"),
        }
    }
}

/// One country's inflation figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryInflationRecord {
    pub rank: Rank,
    pub country: String,
    pub continent: String,
    /// Percentage, e.g. `4.2` means 4.2 %. Always finite.
    pub rate: f64,
}

impl CountryInflationRecord {
    pub fn new(
        rank: Rank,
        country: impl Into<String>,
        continent: impl Into<String>,
        rate: f64,
    ) -> Self {
        Self {
            rank,
            country: country.into(),
            continent: continent.into(),
            rate,
        }
    }
}

// ---------------------------------------------------------------------------
// Load bookkeeping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum DropReason {
    /// The rate cell did not hold a finite number; the raw text is kept.
    UnparseableRate(String),
    /// A country already seen earlier in the file.
    DuplicateCountry(String),
}

/// A source row that did not make it into the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedRow {
    /// 0-based data row index (the header is not counted).
    pub row: usize,
    pub reason: DropReason,
}

/// What happened while reading a source.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub source: PathBuf,
    /// Data rows read from the file, before any were dropped.
    pub rows_read: usize,
    pub dropped: Vec<DroppedRow>,
}

impl LoadReport {
    pub fn dropped_unparseable(&self) -> usize {
        self.dropped
            .iter()
            .filter(|d| matches!(d.reason, DropReason::UnparseableRate(_)))
            .count()
    }
}

/// User-facing notice attached to a dataset whose load failed.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadNotice {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&DatasetError> for LoadNotice {
    fn from(err: &DatasetError) -> Self {
        LoadNotice {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for LoadNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the immutable loaded snapshot
// ---------------------------------------------------------------------------

/// The cleaned table for one session. Never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<CountryInflationRecord>,
    report: LoadReport,
    notice: Option<LoadNotice>,
}

impl Dataset {
    pub fn new(records: Vec<CountryInflationRecord>, report: LoadReport) -> Self {
        Self {
            records,
            report,
            notice: None,
        }
    }

    /// An empty but valid dataset describing why nothing could be loaded.
    pub fn unavailable(source: &Path, err: &DatasetError) -> Self {
        Self {
            records: Vec::new(),
            report: LoadReport {
                source: source.to_path_buf(),
                ..LoadReport::default()
            },
            notice: Some(LoadNotice::from(err)),
        }
    }

    pub fn records(&self) -> &[CountryInflationRecord] {
        &self.records
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn notice(&self) -> Option<&LoadNotice> {
        self.notice.as_ref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct continents in order of first appearance.
    pub fn continents(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.continent.as_str()))
            .map(|r| r.continent.clone())
            .collect()
    }

    /// `(min, max)` rate over the whole dataset.
    pub fn rate_bounds(&self) -> Option<(f64, f64)> {
        let mut iter = self.records.iter().map(|r| r.rate);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    pub fn rate_of(&self, country: &str) -> Option<f64> {
        self.records
            .iter()
            .find(|r| r.country == country)
            .map(|r| r.rate)
    }
}
