//! Aggregations over inflation records: continent statistics, rankings, the
//! headline summary and the purchasing-power calculator.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use super::model::CountryInflationRecord;

/// Ranking length used when the caller does not ask for one.
pub const DEFAULT_TOP_N: usize = 10;

// ---------------------------------------------------------------------------
// Continent aggregates
// ---------------------------------------------------------------------------

/// Summary of all records sharing one continent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinentStats {
    pub continent: String,
    pub average: f64,
    pub max: f64,
    pub min: f64,
    pub count: usize,
}

/// Running totals for one group.
struct Accumulator<'a> {
    continent: &'a str,
    total: f64,
    max: f64,
    min: f64,
    count: usize,
}

impl<'a> Accumulator<'a> {
    fn new(continent: &'a str, rate: f64) -> Self {
        Self {
            continent,
            total: rate,
            max: rate,
            min: rate,
            count: 1,
        }
    }

    fn push(&mut self, rate: f64) {
        self.total += rate;
        self.max = self.max.max(rate);
        self.min = self.min.min(rate);
        self.count += 1;
    }

    fn finish(self) -> ContinentStats {
        ContinentStats {
            continent: self.continent.to_string(),
            average: self.total / self.count as f64,
            max: self.max,
            min: self.min,
            count: self.count,
        }
    }
}

/// Group `records` by continent and compute mean, max, min and count of the
/// rate for each group.
///
/// Groups come out in the order their continent was first seen. That order is
/// an implementation detail; sort the result if a stable display order is
/// needed.
pub fn continent_stats<'a>(
    records: impl IntoIterator<Item = &'a CountryInflationRecord>,
) -> Vec<ContinentStats> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Accumulator<'a>> = Vec::new();

    for record in records {
        match index.get(record.continent.as_str()) {
            Some(&i) => groups[i].push(record.rate),
            None => {
                index.insert(&record.continent, groups.len());
                groups.push(Accumulator::new(&record.continent, record.rate));
            }
        }
    }

    groups.into_iter().map(Accumulator::finish).collect()
}

// ---------------------------------------------------------------------------
// Rankings
// ---------------------------------------------------------------------------

/// Direction of a ranking. `Descending` (highest rate first) is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }
}

/// The first `n` records after a stable sort by rate.
///
/// Records with equal rates keep their input order, so rankings are
/// reproducible. Short input is returned whole; the result is never padded.
pub fn top_n<'a>(
    records: impl IntoIterator<Item = &'a CountryInflationRecord>,
    n: usize,
    order: SortOrder,
) -> Vec<&'a CountryInflationRecord> {
    let mut sorted: Vec<&CountryInflationRecord> = records.into_iter().collect();
    // `sort_by` is stable.
    match order {
        SortOrder::Ascending => sorted.sort_by(|a, b| compare_rates(a.rate, b.rate)),
        SortOrder::Descending => sorted.sort_by(|a, b| compare_rates(b.rate, a.rate)),
    }
    sorted.truncate(n);
    sorted
}

/// IEEE ordering on finite rates: `-0.0` and `0.0` tie.
fn compare_rates(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

// ---------------------------------------------------------------------------
// Headline summary
// ---------------------------------------------------------------------------

/// Headline figures for a set of records.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary<'a> {
    pub average: f64,
    /// First record holding the maximum rate.
    pub highest: &'a CountryInflationRecord,
    /// First record holding the minimum rate.
    pub lowest: &'a CountryInflationRecord,
    pub count: usize,
}

/// Average, extremes and size of `records`; `None` when there are none.
pub fn summary<'a>(
    records: impl IntoIterator<Item = &'a CountryInflationRecord>,
) -> Option<DatasetSummary<'a>> {
    let mut iter = records.into_iter();
    let first = iter.next()?;
    let mut acc = DatasetSummary {
        average: first.rate,
        highest: first,
        lowest: first,
        count: 1,
    };
    for record in iter {
        acc.average += record.rate;
        acc.count += 1;
        if record.rate > acc.highest.rate {
            acc.highest = record;
        }
        if record.rate < acc.lowest.rate {
            acc.lowest = record;
        }
    }
    acc.average /= acc.count as f64;
    Some(acc)
}

// ---------------------------------------------------------------------------
// Purchasing power
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The country erodes more value than the global average.
    LosesMore,
    /// The country erodes the same or less value than the global average.
    PreservesMore,
}

/// One year of inflation applied to an amount, compared with the world average.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PurchasingPower {
    pub amount: f64,
    pub rate: f64,
    pub loss: f64,
    pub effective_value: f64,
    pub average_loss: f64,
    /// `loss - average_loss`; positive means worse than average.
    pub difference: f64,
    pub verdict: Verdict,
}

impl PurchasingPower {
    pub fn compute(amount: f64, country_rate: f64, global_average: f64) -> Self {
        let loss = amount * (country_rate / 100.0);
        let average_loss = amount * (global_average / 100.0);
        let difference = loss - average_loss;
        Self {
            amount,
            rate: country_rate,
            loss,
            effective_value: amount - loss,
            average_loss,
            difference,
            verdict: if difference > 0.0 {
                Verdict::LosesMore
            } else {
                Verdict::PreservesMore
            },
        }
    }
}
