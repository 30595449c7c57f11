mod app;
mod config;
mod editor;
mod keys;
mod log;
mod source;
mod ui;
mod viewer;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use config::ColorMode;

#[derive(Parser)]
#[command(
    name = "srcview",
    about = "Browse verified smart-contract sources in a tabbed terminal viewer",
    version,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON file with the contract sources
    sources: Option<PathBuf>,

    /// File to open first
    #[arg(long)]
    file: Option<String>,

    /// Line to centre in the first file (1-based)
    #[arg(long)]
    line: Option<usize>,

    /// Color mode for this session
    #[arg(long, value_enum)]
    theme: Option<ColorMode>,

    /// Use the narrow stacked layout
    #[arg(long)]
    mobile: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List every import and the file it resolves to
    Imports {
        /// JSON file with the contract sources
        sources: PathBuf,
    },
    /// Show debug information
    Debug,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    log::initialize(true);
    let config_dir = config::get_config_dir()?;
    let mut config = config::Config::load(&config_dir).unwrap_or_else(|e| {
        tracing::warn!("failed to load config, using defaults: {}", e);
        config::Config::default()
    });

    match cli.command {
        Some(Commands::Imports { sources }) => {
            let files = source::load(&sources).await?;
            for (idx, file) in files.iter().enumerate() {
                for import in source::imports::scan_imports(&file.source_code) {
                    let resolved = files
                        .resolve_import(idx, &import.path)
                        .and_then(|target| files.get(target))
                        .map(|target| target.file_path.as_str())
                        .unwrap_or("not found");
                    println!("{} -> {} => {}", file.file_path, import.path, resolved);
                }
            }
            Ok(())
        }
        Some(Commands::Debug) => {
            println!("Debug information:");
            println!("  Config directory: {}", config_dir.display());
            println!("  Color mode: {}", config.color_mode);
            println!("  Sidebar width: {}", config.sidebar_width);
            println!("  Mobile breakpoint: {}", config.mobile_breakpoint);
            println!("  Mouse: {}", config.mouse);
            println!("  Log file: {}", log::log_file_path().display());
            Ok(())
        }
        None => {
            let Some(sources) = cli.sources else {
                anyhow::bail!("no sources file given, see --help");
            };
            let files = source::load(&sources).await?;

            let saved_mode = config.color_mode;
            if let Some(theme) = cli.theme {
                config.color_mode = theme;
            }
            let options = app::LaunchOptions {
                file: cli.file,
                line: cli.line,
                mobile: cli.mobile,
            };
            let final_mode = app::run(files, config.clone(), options)?;

            if cli.theme.is_none() && final_mode != saved_mode {
                config.color_mode = final_mode;
                if let Err(e) = config.save(&config_dir) {
                    tracing::warn!("failed to save color mode: {}", e);
                }
            }
            Ok(())
        }
    }
}
