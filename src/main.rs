mod app;
mod track;
mod util;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use track::BoardSource;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long, default_value = "companies.json")]
    data: PathBuf,

    #[arg(long)]
    demo: bool,

    #[arg(long, default_value_t = 5)]
    top: usize,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let source = if args.demo {
        BoardSource::Demo
    } else {
        BoardSource::File(args.data)
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };

    eframe::run_native(
        "rejection-radar",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::RejectionRadarApp::new(
                cc,
                source.clone(),
                args.top,
            )))
        }),
    )
}
