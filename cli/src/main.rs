mod script;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use pfp_canvas::config::EditorConfig;
use pfp_canvas::error::{ConfigError, EditorError};
use pfp_canvas::target::CropTarget;
use pfp_canvas::zoom;
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

use crate::script::{Script, parse_safe_area, parse_size};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("invalid asset size `{0}`; expected WxH")]
    InvalidAsset(String),
    #[error("invalid safe area `{0}`; expected X,Y,W,H")]
    InvalidSafeArea(String),
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Editor(#[from] EditorError),
}

#[derive(Parser, Debug)]
#[command(name = "cropctl", about = "Replay and inspect crop editor sessions")]
struct Cli {
    /// Log filter, e.g. `debug` or `pfp_canvas=trace`.
    #[arg(long, env = "CROPCTL_LOG", default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a JSON session script and print the final editor state.
    Replay {
        script: PathBuf,

        /// Include every emitted action in the output.
        #[arg(long, default_value_t = false)]
        actions: bool,
    },
    /// Print the zoom range for an asset shown in a safe area.
    Bounds {
        #[arg(long)]
        asset: String,

        #[arg(long)]
        safe_area: String,
    },
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log))
        .with_writer(std::io::stderr)
        .init();

    let base = EditorConfig::from_env()?;
    match cli.command {
        Command::Replay { script, actions } => run_replay(&script, base, actions),
        Command::Bounds { asset, safe_area } => run_bounds(&asset, &safe_area, base),
    }
}

fn run_replay(path: &Path, base: EditorConfig, actions: bool) -> Result<(), CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_path_buf(), source })?;
    let script: Script = serde_json::from_str(&raw)?;
    let report = script::replay(&script, base, actions)?;
    print_json(&serde_json::to_value(&report)?)
}

fn run_bounds(asset: &str, safe_area: &str, config: EditorConfig) -> Result<(), CliError> {
    let size = parse_size(asset).ok_or_else(|| CliError::InvalidAsset(asset.to_owned()))?;
    if !size.is_positive() {
        return Err(EditorError::InvalidAssetSize { width: size.width, height: size.height }.into());
    }
    let safe = parse_safe_area(safe_area).ok_or_else(|| CliError::InvalidSafeArea(safe_area.to_owned()))?;
    if safe.is_degenerate() {
        return Err(EditorError::DegenerateSafeArea.into());
    }

    let target = CropTarget::new(size);
    let bounds = zoom::zoom_bounds(&safe, &target, config.crop_min_size);
    print_json(&json!({
        "min": bounds.min,
        "max": bounds.max,
        "max_nominal": zoom::compute_max_scale(&safe),
    }))
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
