//! Gomoku desktop game against the AI opponent

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use gomoku::logging::setup_logging;
use gomoku::ui::{GomokuApp, HostSettings};
use gomoku::{EngineConfig, Stone};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Color {
    Black,
    White,
}

impl From<Color> for Stone {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Stone::Black,
            Color::White => Stone::White,
        }
    }
}

/// Play Gomoku against a minimax opponent
#[derive(Parser, Debug)]
#[command(name = "gomoku", version, about)]
struct Args {
    /// Color the AI plays; Black moves first
    #[arg(long, value_enum, default_value_t = Color::White)]
    ai_color: Color,

    /// Minimum time before the AI's move appears, in milliseconds
    #[arg(long, default_value_t = 500)]
    think_delay_ms: u64,

    /// Hard limit on the AI's search time, in milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Cap on the search depth (the schedule is 2, 3, then 4 as the board fills)
    #[arg(long)]
    max_depth: Option<i8>,

    /// Log level, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write rotating log files here instead of stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let _logger = setup_logging(&args.log_level, args.log_dir.as_deref())?;

    let mut engine = EngineConfig::default();
    if let Some(depth) = args.max_depth {
        engine = engine.with_max_depth(depth);
    }
    if let Some(ms) = args.time_limit_ms {
        engine = engine.with_time_limit(Duration::from_millis(ms));
    }

    let settings = HostSettings {
        ai_color: args.ai_color.into(),
        engine,
        think_delay: Duration::from_millis(args.think_delay_ms),
    };
    log::info!("starting with {:?}", settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Gomoku"),
        ..Default::default()
    };

    eframe::run_native(
        "Gomoku",
        options,
        Box::new(move |cc| Ok(Box::new(GomokuApp::new(cc, settings)))),
    )?;
    Ok(())
}
