use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};
use inflation_pulse::{
    continent_stats, export_continent_stats, export_records, summary, DatasetService,
};

use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_empty() {
        ui.label("No dataset loaded.");
        return;
    }

    // Clone what we need so we can mutate state inside the loop.
    let continents = state.continents.clone();
    let (lo, hi) = state.rate_bounds;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Continents ----
            let header_text = format!(
                "Continents  ({}/{})",
                state.filter.continents.len(),
                continents.len()
            );
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("continents")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_none();
                        }
                    });

                    for continent in &continents {
                        let mut checked = state.is_selected(continent);
                        let text = RichText::new(continent)
                            .color(state.colors.color_for(continent));
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_continent(continent);
                        }
                    }
                });
            ui.separator();

            // ---- Rate range ----
            ui.strong("Inflation Range (%)");
            ui.add(Slider::new(&mut state.filter.min_rate, lo..=hi).text("min"));
            ui.add(Slider::new(&mut state.filter.max_rate, lo..=hi).text("max"));
            if state.filter.min_rate > state.filter.max_rate {
                ui.label(
                    RichText::new("min is above max: nothing matches").color(Color32::YELLOW),
                );
            }
            if ui.small_button("Reset range").clicked() {
                state.reset_range();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, service: &mut DatasetService) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                if let Some(path) = open_file_dialog() {
                    service.set_source(path);
                    state.set_dataset(service.dataset());
                }
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.set_dataset(service.reload());
                ui.close_menu();
            }
            ui.separator();
            let has_data = !state.dataset.is_empty();
            if ui
                .add_enabled(has_data, egui::Button::new("Export view…"))
                .clicked()
            {
                if let Some(path) = save_file_dialog("inflation_view.json") {
                    if let Err(e) = export_records(&path, state.view()) {
                        log::error!("{e:#}");
                        state.status_message = Some(format!("Export failed: {e:#}"));
                    }
                }
                ui.close_menu();
            }
            if ui
                .add_enabled(has_data, egui::Button::new("Export continent stats…"))
                .clicked()
            {
                if let Some(path) = save_file_dialog("continent_stats.json") {
                    let stats = continent_stats(state.view());
                    if let Err(e) = export_continent_stats(&path, &stats) {
                        log::error!("{e:#}");
                        state.status_message = Some(format!("Export failed: {e:#}"));
                    }
                }
                ui.close_menu();
            }
        });

        ui.separator();

        for tab in Tab::ALL {
            ui.selectable_value(&mut state.tab, tab, tab.label());
        }

        ui.separator();

        if !state.dataset.is_empty() {
            ui.label(format!(
                "{} countries loaded, {} visible",
                state.dataset.len(),
                state.view().len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Headline metrics
// ---------------------------------------------------------------------------

/// World average, extremes and country count over the full dataset.
pub fn headline(ui: &mut Ui, state: &AppState) {
    let Some(world) = summary(state.dataset.records()) else {
        return;
    };

    ui.columns(4, |cols| {
        metric(&mut cols[0], "World Average", &format!("{:.2}%", world.average), None);
        metric(
            &mut cols[1],
            "Highest Rate",
            &format!("{}%", world.highest.rate),
            Some(world.highest.country.as_str()),
        );
        metric(
            &mut cols[2],
            "Lowest Rate",
            &format!("{}%", world.lowest.rate),
            Some(world.lowest.country.as_str()),
        );
        metric(&mut cols[3], "Total Countries", &world.count.to_string(), None);
    });
}

fn metric(ui: &mut Ui, label: &str, value: &str, detail: Option<&str>) {
    ui.group(|ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(RichText::new(label).weak());
            ui.label(RichText::new(value).size(24.0).strong());
            if let Some(detail) = detail {
                ui.label(RichText::new(detail).color(Color32::LIGHT_BLUE));
            }
        });
    });
}

/// Placeholder shown when the dataset is empty.
pub fn no_data(ui: &mut Ui, state: &AppState) {
    ui.centered_and_justified(|ui: &mut Ui| {
        let hint = match state.dataset.notice() {
            Some(notice) => format!("Could not load data.\n{notice}\n\n(File → Open…)"),
            None => "No countries to show  (File → Open…)".to_string(),
        };
        ui.heading(hint);
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open inflation data")
        .add_filter(
            "Supported files",
            &["xlsx", "xlsm", "xls", "ods", "csv", "json", "parquet", "pq"],
        )
        .add_filter("Spreadsheet", &["xlsx", "xlsm", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file()
}

pub fn save_file_dialog(default_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Export as JSON")
        .set_file_name(default_name)
        .add_filter("JSON", &["json"])
        .save_file()
}
