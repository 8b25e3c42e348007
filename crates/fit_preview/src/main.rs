//! Fit Preview - auto-fit a label from the command line
//!
//! Fits the given text into a box and prints the chosen font size and the
//! rectangle it would be drawn into as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use layout_engine::{
    AutoFitConfig, AutoFitLabel, DisplayList, FitResult, Rect, ShapingMeasurer,
    VerticalAlignment,
};
use serde::Serialize;
use std::path::PathBuf;
use text_engine::{FontId, TextShaper};
use text_model::{FontDescriptor, RunStyle, StyledText};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Family name used for a font loaded with `--font` when no `--family` is given
const LOADED_FAMILY: &str = "Preview";

#[derive(Debug, Parser)]
#[command(name = "fit-preview", about = "Fit text into a box at the largest font size that avoids breaking words")]
struct Args {
    /// Text to fit
    text: String,

    /// Box width in points
    #[arg(long)]
    width: f32,

    /// Box height in points; unbounded when omitted
    #[arg(long)]
    height: Option<f32>,

    /// Vertical alignment: top, center or bottom (overrides the config file)
    #[arg(long)]
    align: Option<VerticalAlignment>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Font file (TTF/OTF) to shape with; widths are estimated without one
    #[arg(long)]
    font: Option<PathBuf>,

    /// Font family to request
    #[arg(long)]
    family: Option<String>,

    #[arg(long)]
    bold: bool,

    #[arg(long)]
    italic: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Report {
    Fitted {
        font_size: f32,
        longest_word_font_size: f32,
        measured_width: f32,
        measured_height: f32,
        rect: Rect,
        alignment: VerticalAlignment,
    },
    NothingToDraw,
}

impl Report {
    fn fitted(fit: &FitResult, rect: Rect, alignment: VerticalAlignment) -> Self {
        Report::Fitted {
            font_size: fit.font_size,
            longest_word_font_size: fit.longest_word_font_size,
            measured_width: fit.measured.width,
            measured_height: fit.measured.height,
            rect,
            alignment,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    if args.print_config {
        println!("{}", config.to_json_string()?);
        return Ok(());
    }

    let report = run(&args, &config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn load_config(args: &Args) -> Result<AutoFitConfig> {
    let mut config = match &args.config {
        Some(path) => AutoFitConfig::load_sync(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AutoFitConfig::default(),
    };

    if let Some(alignment) = args.align {
        config.placement.alignment = alignment;
    }
    Ok(config)
}

fn run(args: &Args, config: &AutoFitConfig) -> Result<Report> {
    let family = args
        .family
        .clone()
        .or_else(|| args.font.as_ref().map(|_| LOADED_FAMILY.to_string()));

    let mut shaper = TextShaper::new();
    if let Some(path) = &args.font {
        let id = FontId::from_flags(
            family.clone().unwrap_or_else(|| LOADED_FAMILY.to_string()),
            args.bold,
            args.italic,
        );
        shaper
            .load_font_file(id, path)
            .with_context(|| format!("Failed to load font {}", path.display()))?;
        tracing::info!("Loaded font {}", path.display());
    }
    let measurer = ShapingMeasurer::with_shaper(shaper, config.measure.clone());

    let mut font = FontDescriptor::default()
        .with_bold(args.bold)
        .with_italic(args.italic);
    font.family = family;
    let text = StyledText::plain(args.text.as_str(), RunStyle::with_font(font));

    let height = args.height.unwrap_or(f32::INFINITY);
    let container = Rect::new(0.0, 0.0, args.width, height);

    let label = AutoFitLabel::from_config(config)?;
    let mut display_list = DisplayList::new();
    let placed = label.draw(&text, container, &measurer, &mut display_list)?;
    tracing::debug!("Recorded {} draw calls", display_list.len());

    Ok(match placed {
        Some(placed) => Report::fitted(&placed.fit, placed.rect, label.alignment()),
        None => Report::NothingToDraw,
    })
}
