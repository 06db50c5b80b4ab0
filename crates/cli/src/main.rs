//! Heatfield CLI - headless heatmap snapshots and point queries

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use heatfield_core::{LatLng, MapTransform, MercatorView, Sample};
use heatfield_render::{HeatmapOptions, HeatmapOverlay};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "heatfield")]
#[command(author, version, about = "Interpolated heatmap rendering", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one viewport snapshot to a PNG
    Render {
        #[command(flatten)]
        scene: SceneArgs,
        /// Output PNG file
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Interpolate the field at a coordinate
    Query {
        #[command(flatten)]
        scene: SceneArgs,
        /// Query coordinate as "lat,lon"
        #[arg(short, long, value_parser = parse_latlng)]
        point: LatLng,
    },
}

#[derive(Args)]
struct SceneArgs {
    /// Samples file: JSON array of [lat, lon] or [lat, lon, value]
    #[arg(short, long)]
    samples: PathBuf,
    /// Viewport center as "lat,lon"
    #[arg(short, long, value_parser = parse_latlng)]
    center: LatLng,
    /// Zoom level
    #[arg(short, long, default_value = "13")]
    zoom: f64,
    /// Viewport size as "WIDTHxHEIGHT"
    #[arg(long, default_value = "1024x768", value_parser = parse_size)]
    size: (u32, u32),
    /// Stamp radius in pixels
    #[arg(long, default_value = "32")]
    radius: f64,
    /// Stamp feather width in pixels
    #[arg(long, default_value = "32")]
    blur: f64,
    /// Reading mapped to the top of the color ramp
    #[arg(long, default_value = "1.0")]
    max: f64,
    /// Zoom level at which samples carry full weight
    #[arg(long, default_value = "18")]
    max_zoom: f64,
}

fn parse_latlng(raw: &str) -> std::result::Result<LatLng, String> {
    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected \"lat,lon\", got {raw:?}"))?;
    let lat = lat.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let lng = lng.trim().parse::<f64>().map_err(|e| e.to_string())?;
    Ok(LatLng::new(lat, lng))
}

fn parse_size(raw: &str) -> std::result::Result<(u32, u32), String> {
    let (w, h) = raw
        .split_once('x')
        .ok_or_else(|| format!("expected \"WIDTHxHEIGHT\", got {raw:?}"))?;
    let w = w.trim().parse::<u32>().map_err(|e| e.to_string())?;
    let h = h.trim().parse::<u32>().map_err(|e| e.to_string())?;
    Ok((w, h))
}

// ─── Scene setup ────────────────────────────────────────────────────────

fn load_samples(path: &PathBuf) -> Result<Vec<Sample>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading samples from {}", path.display()))?;
    let samples: Vec<Sample> =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    Ok(samples)
}

/// Build the view and run one full redraw over the loaded samples.
fn render_scene(scene: &SceneArgs) -> Result<(MercatorView, HeatmapOverlay)> {
    let samples = load_samples(&scene.samples)?;
    info!(count = samples.len(), "loaded samples");

    let (width, height) = scene.size;
    let view = MercatorView::new(scene.center, scene.zoom, width, height);

    let options = HeatmapOptions {
        radius: scene.radius,
        blur: scene.blur,
        max: scene.max,
        max_zoom: scene.max_zoom,
        ..Default::default()
    };
    let mut overlay = HeatmapOverlay::new(options).context("invalid heatmap options")?;
    overlay.set_samples(samples);

    let start = Instant::now();
    overlay
        .on_frame(&view)
        .context("redraw failed")?
        .context("no frame was pending")?;
    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        "pipeline complete"
    );

    Ok((view, overlay))
}

// ─── Commands ───────────────────────────────────────────────────────────

fn cmd_render(scene: &SceneArgs, out: &PathBuf) -> Result<()> {
    let (view, overlay) = render_scene(scene)?;
    let raster = overlay.raster().context("no raster was produced")?;

    let (width, height) = view.size();
    let img = image::RgbaImage::from_raw(width, height, raster.data().to_vec())
        .context("raster dimensions do not match pixel data")?;
    img.save(out)
        .with_context(|| format!("writing {}", out.display()))?;

    info!(
        covered = raster.covered_pixels(),
        out = %out.display(),
        "snapshot written"
    );
    Ok(())
}

fn cmd_query(scene: &SceneArgs, point: LatLng) -> Result<()> {
    let (view, overlay) = render_scene(scene)?;
    match overlay.point_query(&view, point) {
        Some(value) => println!("{value:.6}"),
        None => println!("no model available"),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting tracing subscriber")?;

    match &cli.command {
        Commands::Render { scene, out } => cmd_render(scene, out),
        Commands::Query { scene, point } => cmd_query(scene, *point),
    }
}
