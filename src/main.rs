use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use ubs_dashboard::app::UbsDashboardApp;
use ubs_dashboard::data::loader::LoadOptions;
use ubs_dashboard::state::AppState;

/// Interactive dashboard of basic health units (UBS).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Facility file to open at start-up (.csv, .json or .parquet)
    #[arg(value_name = "FILE", default_value = "ubs_atualizado.csv")]
    data: PathBuf,

    /// Field delimiter for CSV input
    #[arg(short, long, default_value = ";", value_parser = parse_delimiter)]
    delimiter: u8,
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!("delimiter must be a single ASCII character, got '{s}'")),
    }
}

fn main() -> eframe::Result {
    env_logger::init();
    let cli = Cli::parse();

    let mut state = AppState::new(LoadOptions {
        delimiter: cli.delimiter,
    });
    if cli.data.exists() {
        state.open(&cli.data);
    } else {
        log::warn!("{} not found, starting without data", cli.data.display());
        state.status_message = Some(format!(
            "{} não encontrado; use Arquivo → Abrir…",
            cli.data.display()
        ));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Dashboard de UBS",
        options,
        Box::new(|_cc| Ok(Box::new(UbsDashboardApp::new(state)))),
    )
}
