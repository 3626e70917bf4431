//! TreeLens — interactive treemap and tree-list explorer.
//!
//! Thin binary entry point. All logic lives in the `treelens-core`
//! and `treelens-gui` crates.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use clap::Parser;
use std::path::PathBuf;
use treelens_gui::StartupOptions;

#[derive(Parser, Debug)]
#[command(name = "treelens", version, about = "Explore a directory size snapshot as a treemap")]
struct Args {
    /// Snapshot JSON to open at start-up
    snapshot: Option<PathBuf>,

    /// Settings file (default: <config dir>/treelens/settings.json)
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Smallest tile edge in pixels that is still subdivided
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    min_pixel_size: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("TreeLens starting");

    let icon = treelens_gui::icon::generate_icon(64);

    // Build application state before opening the window so the snapshot
    // is already loading when the first frame is drawn.
    let state = treelens_gui::TreeLensState::build(StartupOptions {
        snapshot: args.snapshot,
        settings_path: args.settings,
        min_pixel_size: args.min_pixel_size,
    });

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("TreeLens")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 500.0])
            .with_icon(icon),
        ..Default::default()
    };

    eframe::run_native(
        "TreeLens",
        options,
        Box::new(|cc| Ok(Box::new(treelens_gui::TreeLensApp::with_state(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
