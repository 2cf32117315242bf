use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Polygon, Text};
use inflation_pulse::{
    continent_stats, summary, top_n, ContinentStats, CountryInflationRecord, SortOrder,
};

use crate::color::{rate_color, RateScale};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Countries tab – filtered table
// ---------------------------------------------------------------------------

/// Rank, country, continent and colour-coded rate for every visible record.
pub fn countries_table(ui: &mut Ui, state: &AppState) {
    let view = state.view();
    ui.heading("🌎 Countries");
    ui.label(format!(
        "{} of {} countries match the filters",
        view.len(),
        state.dataset.len()
    ));
    ui.separator();

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(50.0))
        .column(Column::auto().at_least(180.0))
        .column(Column::auto().at_least(140.0))
        .column(Column::remainder())
        .header(22.0, |mut header| {
            for title in ["Rank", "Country", "Continent", "Inflation %"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(20.0, view.len(), |mut row| {
                let record = view[row.index()];
                row.col(|ui| {
                    ui.label(record.rank.to_string());
                });
                row.col(|ui| {
                    ui.label(&record.country);
                });
                row.col(|ui| {
                    ui.label(
                        RichText::new(&record.continent)
                            .color(state.colors.color_for(&record.continent)),
                    );
                });
                row.col(|ui| {
                    let color = rate_color(record.rate, state.rate_bounds, RateScale::Spectrum);
                    ui.label(RichText::new(format!("{:.2}", record.rate)).color(color));
                });
            });
        });
}

// ---------------------------------------------------------------------------
// Regional tab – continent aggregates
// ---------------------------------------------------------------------------

pub fn regional(ui: &mut Ui, state: &AppState) {
    let view = state.view();
    let mut stats = continent_stats(view.iter().copied());
    stats.sort_by(|a, b| a.continent.cmp(&b.continent));

    ui.heading("📊 Distribution by Continent");
    ui.columns(2, |cols| {
        // ---- Average per continent ----
        let bars: Vec<Bar> = stats
            .iter()
            .enumerate()
            .map(|(i, s)| {
                Bar::new(i as f64, s.average)
                    .name(format!(
                        "{}: avg {:.2}%, max {:.2}%, min {:.2}%, {} countries",
                        s.continent, s.average, s.max, s.min, s.count
                    ))
                    .fill(state.colors.color_for(&s.continent))
                    .width(0.7)
            })
            .collect();
        let labels: Vec<String> = stats.iter().map(|s| s.continent.clone()).collect();

        Plot::new("continent_average")
            .height(320.0)
            .y_axis_label("Average inflation %")
            .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .allow_drag(false)
            .allow_scroll(false)
            .show(&mut cols[0], |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("Average"));
            });

        // ---- Radar ----
        let highest = stats.iter().map(|s| s.max).fold(0.0_f64, f64::max);
        radar(&mut cols[1], &stats, highest);
    });

    // ---- Insights ----
    ui.add_space(8.0);
    ui.heading("🤖 Engine Insights");
    match summary(view.iter().copied()) {
        Some(s) => {
            ui.label(format!(
                "The average inflation across the selected regions is {:.2}%. {}, which leads \
                 with {}%, signals the strongest economic pressure in the {} region.",
                s.average, s.highest.country, s.highest.rate, s.highest.continent
            ));
        }
        None => {
            ui.label("No countries match the current filters.");
        }
    }
}

/// Average rate per continent drawn on polar axes, radius capped by the
/// highest continent maximum.
fn radar(ui: &mut Ui, stats: &[ContinentStats], radius: f64) {
    let k = stats.len();
    let radius = if radius > 0.0 { radius } else { 1.0 };
    let angle = |i: usize| FRAC_PI_2 - TAU * i as f64 / k.max(1) as f64;

    let outline: Vec<[f64; 2]> = stats
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let r = s.average.clamp(0.0, radius);
            [r * angle(i).cos(), r * angle(i).sin()]
        })
        .collect();

    Plot::new("continent_radar")
        .height(320.0)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            for (i, s) in stats.iter().enumerate() {
                let (x, y) = (radius * angle(i).cos(), radius * angle(i).sin());
                plot_ui.line(
                    Line::new(PlotPoints::from(vec![[0.0, 0.0], [x, y]]))
                        .color(Color32::DARK_GRAY)
                        .width(1.0),
                );
                plot_ui.text(Text::new(
                    PlotPoint::new(x * 1.15, y * 1.15),
                    RichText::new(&s.continent).color(Color32::LIGHT_GRAY),
                ));
            }
            if k >= 3 {
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(outline))
                        .name("Average Inflation")
                        .fill_color(Color32::from_rgba_unmultiplied(0, 242, 255, 60))
                        .stroke((2.0, Color32::from_rgb(0, 242, 255))),
                );
            } else {
                plot_ui.line(Line::new(PlotPoints::from(outline)).name("Average Inflation"));
            }
        });
}

// ---------------------------------------------------------------------------
// Rankings tab – highest and lowest N
// ---------------------------------------------------------------------------

pub fn rankings(ui: &mut Ui, state: &AppState) {
    let view = state.view();
    let highest = top_n(view.iter().copied(), state.top_n, SortOrder::Descending);
    let lowest = top_n(view.iter().copied(), state.top_n, SortOrder::Ascending);

    ui.heading("📉 Ranking Extremes");
    ui.columns(2, |cols| {
        cols[0].strong(format!("Top {} High Inflation", state.top_n));
        ranking_chart(&mut cols[0], "ranking_high", &highest, state, RateScale::Reds);

        cols[1].strong(format!("Top {} Stable Economies", state.top_n));
        ranking_chart(&mut cols[1], "ranking_low", &lowest, state, RateScale::Blues);
    });
}

/// Horizontal bars, first record at the top.
fn ranking_chart(
    ui: &mut Ui,
    id: &str,
    records: &[&CountryInflationRecord],
    state: &AppState,
    scale: RateScale,
) {
    let n = records.len();
    let bars: Vec<Bar> = records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Bar::new((n - i) as f64, r.rate)
                .name(format!("{} ({}): {:.2}%", r.country, r.continent, r.rate))
                .fill(rate_color(r.rate, state.rate_bounds, scale))
                .width(0.8)
        })
        .collect();
    // Axis position `n - i` maps back to `records[i]`.
    let labels: Vec<String> = records.iter().rev().map(|r| r.country.clone()).collect();

    Plot::new(id)
        .height(360.0)
        .x_axis_label("Inflation %")
        .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value - 1.0))
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

/// Label for an integer axis position, empty between categories.
fn category_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_only_on_whole_positions() {
        let labels = vec!["Africa".to_string(), "Asia".to_string()];
        assert_eq!(category_label(&labels, 0.0), "Africa");
        assert_eq!(category_label(&labels, 1.0), "Asia");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }
}
