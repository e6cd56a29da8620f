use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dv::controller::Controller;
use dv::domain::{DvConfig, DvError};
use dv::model::{Model, Status};
use dv::ui::DashboardUI;

/// A tui based document-management dashboard.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Document records file (csv or parquet)
    file: Option<String>,

    /// Override the appearance settings directory
    #[arg(long)]
    settings_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_logging();
    let result = run();
    ratatui::restore();
    match result {
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn run() -> Result<(), DvError> {
    let cli = Cli::parse();
    let cfg = DvConfig {
        settings_dir: cli.settings_dir,
        ..DvConfig::default()
    };

    let mut terminal = ratatui::init();
    let size = terminal.size()?;

    let mut model = Model::init(&cfg, size.height as usize)?;
    if let Some(file) = cli.file {
        let path = shellexpand::full(&file).map_err(|e| DvError::LoadingFailed(e.to_string()))?;
        model.load_documents(PathBuf::from(path.as_ref()))?;
    }

    let mut ui = DashboardUI::new();
    let controller = Controller::new(&cfg);

    while model.status != Status::QUITTING {
        terminal.draw(|f| ui.draw(model.get_uidata(), f))?;
        if let Some(message) = controller.handle_event(&model)? {
            model.update(message)?;
        }
    }

    Ok(())
}

// The terminal owns stderr, so logs go to a file when DV_LOG is set.
fn init_logging() {
    if let Ok(path) = std::env::var("DV_LOG")
        && let Ok(file) = std::fs::File::create(path)
    {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }
}
