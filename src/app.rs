use eframe::egui;
use inflation_pulse::{DashboardConfig, DatasetService};

use crate::state::{AppState, Tab};
use crate::ui::{calculator, panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct InflationPulseApp {
    pub service: DatasetService,
    pub state: AppState,
}

impl InflationPulseApp {
    pub fn new(service: DatasetService, config: &DashboardConfig) -> Self {
        let state = AppState::new(service.dataset(), config);
        Self { service, state }
    }
}

impl eframe::App for InflationPulseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, &mut self.service);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: headline metrics + active tab ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_empty() {
                panels::no_data(ui, &self.state);
                return;
            }

            panels::headline(ui, &self.state);
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| match self.state.tab {
                Tab::Countries => plot::countries_table(ui, &self.state),
                Tab::Regional => plot::regional(ui, &self.state),
                Tab::Rankings => plot::rankings(ui, &self.state),
                Tab::Calculator => calculator::calculator(ui, &mut self.state),
            });
        });
    }
}
