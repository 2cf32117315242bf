use std::sync::Arc;

use inflation_pulse::data::model::LoadNotice;
use inflation_pulse::{
    filter_by_continent_and_range, summary, CountryInflationRecord, DashboardConfig, Dataset,
    PurchasingPower, RecordFilter,
};

use crate::color::ContinentColors;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Countries,
    Regional,
    Rankings,
    Calculator,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Countries, Tab::Regional, Tab::Rankings, Tab::Calculator];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Countries => "🌎 Countries",
            Tab::Regional => "📊 Regional Analytics",
            Tab::Rankings => "📉 Rankings",
            Tab::Calculator => "🧮 Impact Calculator",
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Snapshot handed out by the dataset service.
    pub dataset: Arc<Dataset>,

    /// Every continent in the dataset, in first-appearance order.
    pub continents: Vec<String>,

    /// `(min, max)` rate of the whole dataset; slider bounds.
    pub rate_bounds: (f64, f64),

    /// Continent checkboxes and rate sliders.
    pub filter: RecordFilter,

    pub colors: ContinentColors,

    pub tab: Tab,

    /// Length of the highest/lowest rankings.
    pub top_n: usize,

    /// Purchasing-power calculator inputs.
    pub amount: f64,
    pub selected_country: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, config: &DashboardConfig) -> Self {
        let mut state = Self {
            dataset: Arc::new(Dataset::default()),
            continents: Vec::new(),
            rate_bounds: (0.0, 0.0),
            filter: RecordFilter::new(Vec::<String>::new(), 0.0, 0.0),
            colors: ContinentColors::new(&[]),
            tab: Tab::Countries,
            top_n: config.top_n,
            amount: config.default_amount,
            selected_country: None,
            status_message: None,
        };
        state.set_dataset(dataset);
        state
    }

    /// Ingest a newly loaded dataset, reset filters and colours.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.continents = dataset.continents();
        self.rate_bounds = dataset.rate_bounds().unwrap_or((0.0, 0.0));
        self.filter = RecordFilter::all(&dataset);
        self.colors = ContinentColors::new(&self.continents);
        self.selected_country = dataset.records().first().map(|r| r.country.clone());
        self.status_message = status_for(&dataset);
        self.dataset = dataset;
    }

    /// Records passing the current filter.
    pub fn view(&self) -> Vec<&CountryInflationRecord> {
        filter_by_continent_and_range(self.dataset.records(), &self.filter)
    }

    pub fn is_selected(&self, continent: &str) -> bool {
        self.filter.continents.contains(continent)
    }

    /// Toggle a single continent in the filter.
    pub fn toggle_continent(&mut self, continent: &str) {
        if !self.filter.continents.remove(continent) {
            self.filter.continents.insert(continent.to_string());
        }
    }

    pub fn select_all(&mut self) {
        self.filter.continents = self.continents.iter().cloned().collect();
    }

    pub fn select_none(&mut self) {
        self.filter.continents.clear();
    }

    /// Put the rate sliders back to the full dataset range.
    pub fn reset_range(&mut self) {
        (self.filter.min_rate, self.filter.max_rate) = self.rate_bounds;
    }

    /// Calculator result for the selected country against the world average.
    pub fn purchasing_power(&self) -> Option<PurchasingPower> {
        let country = self.selected_country.as_deref()?;
        let rate = self.dataset.rate_of(country)?;
        let world = summary(self.dataset.records())?;
        Some(PurchasingPower::compute(self.amount, rate, world.average))
    }
}

fn status_for(dataset: &Dataset) -> Option<String> {
    if let Some(LoadNotice { message, .. }) = dataset.notice() {
        return Some(format!("Error: {message}"));
    }
    let dropped = dataset.report().dropped.len();
    (dropped > 0).then(|| format!("{dropped} rows skipped while loading"))
}

#[cfg(test)]
mod tests {
    use inflation_pulse::data::model::{DropReason, DroppedRow, LoadReport};
    use inflation_pulse::{Rank, Verdict};

    use super::*;

    fn dataset() -> Arc<Dataset> {
        let rec = |c: &str, cont: &str, rate: f64| {
            CountryInflationRecord::new(Rank::Unranked, c, cont, rate)
        };
        let report = LoadReport {
            rows_read: 5,
            dropped: vec![DroppedRow {
                row: 4,
                reason: DropReason::UnparseableRate("n/a".into()),
            }],
            ..LoadReport::default()
        };
        Arc::new(Dataset::new(
            vec![
                rec("A", "X", 5.0),
                rec("B", "X", 3.0),
                rec("C", "Y", 10.0),
                rec("D", "Z", -2.0),
            ],
            report,
        ))
    }

    #[test]
    fn starts_with_everything_visible() {
        let state = AppState::new(dataset(), &DashboardConfig::default());
        assert_eq!(state.view().len(), 4);
        assert_eq!(state.rate_bounds, (-2.0, 10.0));
        assert_eq!(state.selected_country.as_deref(), Some("A"));
        assert_eq!(state.status_message.as_deref(), Some("1 rows skipped while loading"));
    }

    #[test]
    fn continent_toggles_and_range_narrow_the_view() {
        let mut state = AppState::new(dataset(), &DashboardConfig::default());
        state.toggle_continent("Y");
        assert!(!state.is_selected("Y"));
        assert_eq!(state.view().len(), 3);

        state.filter.min_rate = 0.0;
        let names: Vec<&str> = state.view().iter().map(|r| r.country.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);

        state.select_none();
        assert!(state.view().is_empty());
        state.select_all();
        state.reset_range();
        assert_eq!(state.view().len(), 4);
    }

    #[test]
    fn calculator_uses_world_average() {
        let mut state = AppState::new(dataset(), &DashboardConfig::default());
        state.selected_country = Some("C".into());
        let pp = state.purchasing_power().unwrap();
        // World average: (5 + 3 + 10 - 2) / 4 = 4.
        assert!((pp.average_loss - 40.0).abs() < 1e-9);
        assert!((pp.loss - 100.0).abs() < 1e-9);
        assert_eq!(pp.verdict, Verdict::LosesMore);

        state.selected_country = Some("Nowhere".into());
        assert!(state.purchasing_power().is_none());
    }

    #[test]
    fn empty_dataset_has_nothing_to_show() {
        let state = AppState::new(Arc::new(Dataset::default()), &DashboardConfig::default());
        assert!(state.view().is_empty());
        assert!(state.selected_country.is_none());
        assert!(state.purchasing_power().is_none());
    }
}
