// Copyright 2025 the Monarrange Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless walkthrough of the display arrangement editor.
//!
//! Builds an in-memory three-display desktop, drags one display on a canvas,
//! rotates another through the form fields, zooms, and commits.
//!
//! Run:
//! - `cargo run -p monarrange_demos -- -v`
//! - `cargo run -p monarrange_demos -- --fail DISPLAY3 --log-format compact`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use kurbo::Size;
use monarrange::interaction::{Modifiers, PointerEvent, WheelEvent};
use monarrange::topology::{
    ApplyCode, DisplayGeometry, MemoryBackend, Position, Size as DisplaySize,
};
use monarrange::view2d::ViewPoint;
use monarrange::{CanvasId, Editor, EditorConfig};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Log output format.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Walk through staging, inspecting and committing a display arrangement.
#[derive(Parser, Debug)]
#[command(name = "monarrange-walkthrough", version, about, long_about = None)]
struct Args {
    /// Editor configuration file (TOML)
    #[arg(short, long, env = "MONARRANGE_CONFIG")]
    config: Option<PathBuf>,

    /// Make the backend reject every apply for this display (repeatable)
    #[arg(long, value_name = "DISPLAY")]
    fail: Vec<String>,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let config = match &args.config {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EditorConfig::default(),
    };

    let backend = sample_desktop(&args.fail);
    let mut editor = Editor::new(backend, config).context("enumerating displays")?;
    let canvas = editor.add_canvas();
    print_layout(&editor, canvas, "Attached displays");

    // Drag DISPLAY2 (drawn at view (292, 100)) below DISPLAY1.
    editor.pointer_down(canvas, &PointerEvent::at(300, 110));
    for step in 1..=4 {
        let y = 110 + step * 25;
        let outcome = editor.pointer_move(canvas, &PointerEvent::at(300 - step * 50, y));
        info!(?outcome, "pointer moved");
    }
    editor.pointer_up(canvas, &PointerEvent::at(100, 210));

    // Rotate DISPLAY3 as if picked in the rotation field.
    let rotated = editor
        .set_rotation_field("DISPLAY3", "90")
        .context("parsing rotation")?;
    info!(rotated, "rotation field applied");
    if let Err(err) = editor.set_position_fields("DISPLAY3", "east", "0") {
        warn!(error = %err, "rejected form input");
    }

    // Zoom out two steps and pan so everything is in view.
    let zoom = WheelEvent::new(-2, ViewPoint::new(0, 0)).with_modifiers(Modifiers::CONTROL);
    editor.wheel(canvas, &zoom);
    let pan = PointerEvent::at(0, 0).with_modifiers(Modifiers::CONTROL);
    editor.pointer_down(canvas, &pan);
    editor.pointer_move(canvas, &PointerEvent::at(40, 20));
    editor.pointer_up(canvas, &PointerEvent::at(40, 20));

    print_layout(&editor, canvas, "Pending layout");
    let lines = editor.grid_lines(canvas, Size::new(800.0, 600.0));
    let majors = lines.iter().filter(|line| line.major).count();
    println!("Grid: {} lines ({majors} major) in an 800x600 view", lines.len());

    let report = editor.commit().context("committing display changes")?;
    if report.is_success() {
        println!("\nDisplay settings updated successfully");
    } else {
        println!("\nFailed to update display settings");
        for (display, code) in report.failed() {
            println!("  {display}: code {}", code.0);
        }
    }
    print_layout(&editor, canvas, "Committed layout");
    Ok(())
}

/// Three side-by-side displays; every display named in `fail` rejects changes.
fn sample_desktop(fail: &[String]) -> MemoryBackend {
    let mut backend = MemoryBackend::from_displays([
        (
            "DISPLAY1",
            DisplayGeometry::new(Position::new(0, 0), DisplaySize::new(1920, 1080))
                .with_refresh_rate(144)
                .primary(),
        ),
        (
            "DISPLAY2",
            DisplayGeometry::new(Position::new(1920, 0), DisplaySize::new(1920, 1080))
                .with_refresh_rate(60),
        ),
        (
            "DISPLAY3",
            DisplayGeometry::new(Position::new(3840, 0), DisplaySize::new(2560, 1440))
                .with_refresh_rate(75),
        ),
    ]);
    for id in fail {
        warn!(display = %id, "backend will reject changes");
        backend.fail_with(id.as_str(), ApplyCode(-1));
    }
    backend
}

fn print_layout(editor: &Editor<MemoryBackend>, canvas: CanvasId, title: &str) {
    println!("\n== {title} ==");
    for (view, rect) in editor.display_rects(canvas) {
        let marker = if view.has_pending { " *" } else { "" };
        println!("[{}]{marker}", view.id);
        println!("{view}");
        println!(
            "Canvas: ({}, {}) {}x{}",
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height()
        );
    }
}

fn init_logging(args: &Args) {
    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "monarrange={level},monarrange_topology={level},monarrange_interaction={level},monarrange_walkthrough={level},warn"
        ))
    });

    let registry = tracing_subscriber::registry().with(env_filter);
    match args.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .init(),
    }
}
