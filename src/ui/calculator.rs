use eframe::egui::{self, Color32, RichText, Ui};
use inflation_pulse::Verdict;

use crate::state::AppState;

/// Purchasing-power calculator: what a year of a country's inflation does to
/// an amount, compared with the world average.
pub fn calculator(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🧮 Purchasing Power Calculator");
    ui.label("Calculate how inflation in different countries affects your money's value in 2025.");
    ui.separator();

    let countries: Vec<String> = state
        .dataset
        .records()
        .iter()
        .map(|r| r.country.clone())
        .collect();

    ui.columns(2, |cols| {
        let ui = &mut cols[0];
        ui.horizontal(|ui: &mut Ui| {
            ui.label("Enter Amount ($)");
            ui.add(
                egui::DragValue::new(&mut state.amount)
                    .speed(100.0)
                    .range(0.0..=f64::MAX)
                    .prefix("$"),
            );
        });
        let selected = state.selected_country.clone().unwrap_or_default();
        egui::ComboBox::from_id_salt("calculator_country")
            .selected_text(&selected)
            .height(300.0)
            .show_ui(ui, |ui: &mut Ui| {
                for country in &countries {
                    if ui.selectable_label(selected == *country, country).clicked() {
                        state.selected_country = Some(country.clone());
                    }
                }
            });

        let ui = &mut cols[1];
        let Some(pp) = state.purchasing_power() else {
            ui.label("Select a country to see its impact.");
            return;
        };
        ui.group(|ui: &mut Ui| {
            ui.heading(format!("Impact Analysis for {selected}"));
            ui.label(format!("Inflation Rate: {}%", pp.rate));
            ui.separator();
            ui.label(
                RichText::new(format!("Purchasing Power Loss: -${:.2}", pp.loss))
                    .color(Color32::from_rgb(255, 75, 75)),
            );
            ui.label(
                RichText::new(format!("Effective Value: ${:.2}", pp.effective_value))
                    .size(22.0)
                    .color(Color32::from_rgb(0, 242, 255)),
            );
        });
    });

    ui.separator();
    ui.strong("Comparison with Global Average");
    if let (Some(pp), Some(country)) = (state.purchasing_power(), &state.selected_country) {
        let (text, color) = match pp.verdict {
            Verdict::LosesMore => (
                format!(
                    "Holding money in {country} loses ${:.2} more value than the global average.",
                    pp.difference.abs()
                ),
                Color32::YELLOW,
            ),
            Verdict::PreservesMore => (
                format!(
                    "{country} is outperforming the global average by preserving ${:.2} more value.",
                    pp.difference.abs()
                ),
                Color32::LIGHT_GREEN,
            ),
        };
        ui.label(RichText::new(text).color(color));
    }
}
