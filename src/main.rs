//! Log Group Viewer - Entry Point

use clap::Parser;
use lgv::clipboard::SystemClipboard;
use lgv::config::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
    ResolvedConfig,
};
use lgv::model::AppError;
use lgv::source::DirectorySource;
use lgv::state::{NavigationController, NavigationOptions};
use lgv::view::{ColorConfig, ViewOptions};
use lgv::view_state::VALID_THEMES;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Log Group Viewer - browse log groups, streams and events in the terminal
#[derive(Parser, Debug)]
#[command(name = "lgv")]
#[command(version)]
#[command(about = "TUI browser for log groups, streams and events")]
pub struct Args {
    /// Log group to open on startup (exact name or unique prefix)
    pub group: Option<String>,

    /// Directory holding the log tree
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Color theme for JSON highlighting
    #[arg(long, value_parser = clap::builder::PossibleValuesParser::new(VALID_THEMES.iter().copied()))]
    pub theme: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

/// Resolve configuration: Defaults → Config File → Env Vars → CLI Args.
fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    let config_file = load_config_with_precedence(args.config.clone())?;
    let merged = merge_config(config_file);
    let with_env = apply_env_overrides(merged);
    Ok(apply_cli_overrides(
        with_env,
        args.root.clone(),
        args.theme.clone(),
    ))
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(&args)?;

    lgv::logging::init(&config.log_file_path).map_err(AppError::from)?;
    info!(config = ?config, "Configuration loaded and resolved");

    let source = DirectorySource::open(&config.log_root, config.page_sizes).map_err(|e| {
        error!(error = %e, "Cannot open log root");
        AppError::from(e)
    })?;

    let nav = NavigationController::new(
        Box::new(source),
        Box::new(SystemClipboard::new()),
        NavigationOptions {
            group_prefix: config.group_prefix.clone(),
            list_width_percent: config.list_width_percent,
        },
    );
    let options = ViewOptions {
        colors: ColorConfig::from_env_and_args(args.no_color),
        theme: config.theme,
    };

    lgv::view::run(nav, args.group.as_deref(), &options)?;
    Ok(())
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("lgv: {e}");
            ExitCode::FAILURE
        }
    }
}
