use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use drawboard::config::CompressionMode;
use drawboard::input::InputState;
use drawboard::session::{self, ExportOptions};
use drawboard::{Config, script};
use log::info;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "drawboard")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("DRAWBOARD_GIT_HASH"), ")"),
    about = "Vector drawing board with drag-to-shape tools and arrowheads"
)]
struct Cli {
    /// Gesture script to replay (JSON array of steps)
    #[arg(long, short = 's', value_name = "FILE")]
    script: Option<PathBuf>,

    /// Render the final canvas to this PNG file
    #[arg(long, short = 'o', value_name = "PNG")]
    output: Option<PathBuf>,

    /// Canvas width in pixels (overrides config)
    #[arg(long, value_name = "W")]
    width: Option<u32>,

    /// Canvas height in pixels (overrides config)
    #[arg(long, value_name = "H")]
    height: Option<u32>,

    /// Load a saved scene before running the script
    #[arg(long, value_name = "SCENE")]
    load: Option<PathBuf>,

    /// Save the final scene to this file
    #[arg(long, value_name = "SCENE")]
    export: Option<PathBuf>,

    /// Always gzip the exported scene
    #[arg(long, action = ArgAction::SetTrue, requires = "export")]
    compress: bool,

    /// Use this config file instead of ~/.config/drawboard/config.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.script.is_none() && cli.load.is_none() && cli.output.is_none() && cli.export.is_none()
    {
        print_usage();
        return Ok(());
    }
    if cli.output.is_none() && cli.export.is_none() {
        bail!("nothing to write: pass --output and/or --export");
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(width) = cli.width {
        config.canvas.width = width;
    }
    if let Some(height) = cli.height {
        config.canvas.height = height;
    }
    config.validate_and_clamp();

    let mut options = ExportOptions::from_config(&config.export);
    if cli.compress {
        options = options.with_compression(CompressionMode::On);
    }

    let mut state = InputState::from_config(&config)?;

    if let Some(path) = &cli.load {
        let snapshot = session::load_scene(path, &options)?;
        state.canvas.restore(snapshot);
    }

    if let Some(path) = &cli.script {
        let steps = script::load_script(path)?;
        info!("Replaying {} steps from {}", steps.len(), path.display());
        script::run_script(&mut state, &steps)?;
    }

    if let Some(path) = &cli.output {
        render_png(&mut state, path)?;
        println!(
            "Rendered {} objects to {}",
            state.canvas.len(),
            path.display()
        );
    }

    if let Some(path) = &cli.export {
        let compressed = session::save_scene(path, &state.canvas.snapshot(), &options)?;
        println!(
            "Exported {} objects to {}{}",
            state.canvas.len(),
            path.display(),
            if compressed { " (gzip)" } else { "" }
        );
    }

    Ok(())
}

fn render_png(state: &mut InputState, path: &Path) -> Result<()> {
    let width = i32::try_from(state.canvas.width()).context("canvas width out of range")?;
    let height = i32::try_from(state.canvas.height()).context("canvas height out of range")?;

    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)
        .context("failed to create image surface")?;
    {
        let ctx = cairo::Context::new(&surface).context("failed to create cairo context")?;
        state.render(&ctx);
    }
    surface.flush();

    let mut file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    surface
        .write_to_png(&mut file)
        .with_context(|| format!("failed to write PNG {}", path.display()))?;
    info!("Wrote {}x{} PNG to {}", width, height, path.display());
    Ok(())
}

fn print_usage() {
    println!("drawboard: drag-to-shape drawing board");
    println!();
    println!("Usage:");
    println!("  drawboard --script gestures.json --output board.png");
    println!("  drawboard --load scene.json --output board.png");
    println!("  drawboard --script gestures.json --export scene.json [--compress]");
    println!("  drawboard --help");
    println!();
    println!("Script steps (JSON array):");
    println!("  {{\"tool\": \"arrow\"}}              select a tool");
    println!("  {{\"style\": {{\"stroke\": \"blue\"}}}}    change the style of new shapes");
    println!("  {{\"down\": [x, y]}}, {{\"move\": [x, y]}}, {{\"up\": [x, y]}}");
    println!("  {{\"key\": \"Ctrl+C\"}}              press a key chord");
    println!("  {{\"text\": \"...\"}}                set the selected text");
    println!("  {{\"scale\": [sx, sy]}}            scale the selected object");
    println!("  {{\"zoom\": 1.5}}                  zoom around the centre");
    println!();
    println!("Config: ~/.config/drawboard/config.toml");
}
