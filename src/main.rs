mod app;
mod color;
mod state;
mod ui;

use app::InflationPulseApp;
use eframe::egui;
use inflation_pulse::{DashboardConfig, DatasetService};

fn main() -> eframe::Result {
    env_logger::init();

    // An explicit path argument beats INFLATION_DATA_PATH and the default.
    let mut config = DashboardConfig::from_env();
    if let Some(path) = std::env::args_os().nth(1) {
        config = config.with_data_path(path);
    }
    log::info!("Reading inflation data from {}", config.data_path.display());

    let service = DatasetService::new(&config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Global Inflation Pulse 2025",
        options,
        Box::new(move |_cc| Ok(Box::new(InflationPulseApp::new(service, &config)))),
    )
}
