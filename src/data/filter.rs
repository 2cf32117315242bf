use std::collections::BTreeSet;

use super::model::{CountryInflationRecord, Dataset};

// ---------------------------------------------------------------------------
// Filter predicate: selected continents + inclusive rate range
// ---------------------------------------------------------------------------

/// Which records the dashboard currently shows.
///
/// A record passes when its continent is selected **and**
/// `min_rate <= rate <= max_rate`. An empty continent set, or a range with
/// `min_rate > max_rate`, lets nothing through.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFilter {
    pub continents: BTreeSet<String>,
    pub min_rate: f64,
    pub max_rate: f64,
}

impl RecordFilter {
    pub fn new(
        continents: impl IntoIterator<Item = impl Into<String>>,
        min_rate: f64,
        max_rate: f64,
    ) -> Self {
        Self {
            continents: continents.into_iter().map(Into::into).collect(),
            min_rate,
            max_rate,
        }
    }

    /// A filter with every continent selected and the range spanning the
    /// whole dataset, i.e. one that shows everything.
    pub fn all(dataset: &Dataset) -> Self {
        let (min_rate, max_rate) = dataset.rate_bounds().unwrap_or((0.0, 0.0));
        Self::new(dataset.continents(), min_rate, max_rate)
    }

    pub fn matches(&self, record: &CountryInflationRecord) -> bool {
        self.continents.contains(&record.continent)
            && self.min_rate <= record.rate
            && record.rate <= self.max_rate
    }
}

/// Keep the records that pass `filter`, preserving their relative order.
///
/// Accepts the base dataset (`dataset.records()`) as well as an earlier view
/// (`view.iter().copied()`), so views can be narrowed further.
pub fn filter_by_continent_and_range<'a>(
    records: impl IntoIterator<Item = &'a CountryInflationRecord>,
    filter: &RecordFilter,
) -> Vec<&'a CountryInflationRecord> {
    records.into_iter().filter(|r| filter.matches(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LoadReport, Rank};

    fn rec(country: &str, continent: &str, rate: f64) -> CountryInflationRecord {
        CountryInflationRecord::new(Rank::Unranked, country, continent, rate)
    }

    fn sample() -> Vec<CountryInflationRecord> {
        vec![
            rec("A", "X", 5.0),
            rec("B", "X", 3.0),
            rec("C", "Y", 4.0),
            rec("D", "Z", 6.0),
            rec("E", "X", 4.0),
        ]
    }

    fn names(view: &[&CountryInflationRecord]) -> Vec<String> {
        view.iter().map(|r| r.country.clone()).collect()
    }

    #[test]
    fn keeps_matching_continent_and_range() {
        let records = sample();
        let view = filter_by_continent_and_range(&records, &RecordFilter::new(["X"], 4.0, 6.0));
        assert_eq!(names(&view), vec!["A", "E"]);
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let records = sample();
        let filter = RecordFilter::new(["X", "Y", "Z"], 4.0, 5.0);
        let view = filter_by_continent_and_range(&records, &filter);
        assert_eq!(names(&view), vec!["A", "C", "E"]);
    }

    #[test]
    fn empty_selection_or_inverted_range_yields_nothing() {
        let records = sample();
        let none: [&str; 0] = [];
        let nothing_selected = RecordFilter::new(none, 0.0, 10.0);
        assert!(filter_by_continent_and_range(&records, &nothing_selected).is_empty());
        let inverted = RecordFilter::new(["X"], 6.0, 2.0);
        assert!(filter_by_continent_and_range(&records, &inverted).is_empty());
    }

    #[test]
    fn filtering_twice_is_idempotent() {
        let records = sample();
        let filter = RecordFilter::new(["X", "Z"], 3.5, 10.0);
        let once = filter_by_continent_and_range(&records, &filter);
        let twice = filter_by_continent_and_range(once.iter().copied(), &filter);
        assert_eq!(once, twice);
    }

    #[test]
    fn all_filter_shows_everything() {
        let ds = Dataset::new(sample(), LoadReport::default());
        let filter = RecordFilter::all(&ds);
        assert_eq!(filter.min_rate, 3.0);
        assert_eq!(filter.max_rate, 6.0);
        assert_eq!(
            filter_by_continent_and_range(ds.records(), &filter).len(),
            ds.len()
        );
    }
}
