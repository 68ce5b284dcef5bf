//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use sheetfold_data::{normalize_output_path, MergeEngine, MergeSummary};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "sheetfold")]
#[command(author, version, about = "Fold the sheets of a workbook into one table", long_about = None)]
struct Cli {
    /// Configuration file (default: sheetfold.toml next to the input)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine cells at the same position across all sheets
    Positional {
        /// Input workbook (.xlsx, .xlsm, .xlsb, .xls, .ods, .csv, .tsv)
        input: PathBuf,

        /// Output workbook (.xlsx is appended when missing)
        output: PathBuf,
    },

    /// Combine rows sharing a leading key across all sheets
    Grouped {
        /// Input workbook (.xlsx, .xlsm, .xlsb, .xls, .ods, .csv, .tsv)
        input: PathBuf,

        /// Output workbook (.xlsx is appended when missing)
        output: PathBuf,

        /// Leading rows of every sheet combined by position (e.g. headers)
        #[arg(long, visible_alias = "skip-initial-lines")]
        skip_rows: Option<usize>,
    },

    /// List the sheets of a workbook in order
    Sheets {
        /// Input workbook
        input: PathBuf,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Positional { input, output } => {
            positional_command(&input, &output, config)?;
        }
        Commands::Grouped {
            input,
            output,
            skip_rows,
        } => {
            grouped_command(&input, &output, skip_rows, config)?;
        }
        Commands::Sheets { input } => {
            sheets_command(&input, config)?;
        }
    }

    Ok(())
}

/// Install the stderr subscriber; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Execute the positional command
pub fn positional_command(input: &Path, output: &Path, config: Option<&Path>) -> Result<()> {
    println!("sheetfold v{}", sheetfold_core::VERSION);
    println!("Positional merge: {}", input.display());

    ensure_input(input)?;
    let settings = load_settings(config, input)?;
    let engine = merge_engine(&settings)?;

    let output = normalize_output_path(output);
    let summary = engine
        .accumulate_positional(input, &output)
        .with_context(|| format!("Failed to merge workbook: {}", input.display()))?;

    report(&summary, &output);
    Ok(())
}

/// Execute the grouped command
///
/// `skip_rows` overrides `grouped.skip_rows` from the configuration.
pub fn grouped_command(
    input: &Path,
    output: &Path,
    skip_rows: Option<usize>,
    config: Option<&Path>,
) -> Result<()> {
    println!("sheetfold v{}", sheetfold_core::VERSION);
    println!("Grouped merge: {}", input.display());

    ensure_input(input)?;
    let settings = load_settings(config, input)?;
    let engine = merge_engine(&settings)?;
    let skip_rows = skip_rows.unwrap_or(settings.grouped.skip_rows);
    if skip_rows > 0 {
        println!("  Leading rows kept in place: {}", skip_rows);
    }

    let output = normalize_output_path(output);
    let summary = engine
        .accumulate_grouped(input, &output, skip_rows)
        .with_context(|| format!("Failed to merge workbook: {}", input.display()))?;

    report(&summary, &output);
    Ok(())
}

/// Execute the sheets command
pub fn sheets_command(input: &Path, config: Option<&Path>) -> Result<()> {
    ensure_input(input)?;
    let settings = load_settings(config, input)?;
    let engine = merge_engine(&settings)?;

    let names = engine
        .list_sheets(input)
        .with_context(|| format!("Failed to open workbook: {}", input.display()))?;

    for (index, name) in names.iter().enumerate() {
        println!("{:>3}  {}", index + 1, name);
    }
    Ok(())
}

fn ensure_input(input: &Path) -> Result<()> {
    if !input.is_file() {
        anyhow::bail!("Input file not found: {}", input.display());
    }
    Ok(())
}

/// Load settings from `--config`, else from `sheetfold.toml` next to the
/// input, else defaults
fn load_settings(config_path: Option<&Path>, input: &Path) -> Result<Settings> {
    let path = match config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            path.to_path_buf()
        }
        None => match Settings::discover(input) {
            Some(path) => path,
            None => return Ok(Settings::default()),
        },
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let settings = Settings::from_toml_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    debug!(config = %path.display(), "settings loaded");
    Ok(settings)
}

fn merge_engine(settings: &Settings) -> Result<MergeEngine> {
    let options = settings.merge_options().with_context(|| {
        format!(
            "Invalid CSV delimiter {:?}: expected a single ASCII character",
            settings.csv.delimiter
        )
    })?;
    Ok(MergeEngine::with_options(options))
}

fn report(summary: &MergeSummary, output: &Path) {
    println!("  Sheets: {}", summary.sheets);
    println!("  Created: {}", output.display());
    println!();
    println!("Merge complete!");
    println!(
        "  {} rows, {} cells written",
        summary.rows, summary.cells_written
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_grouped_with_alias() {
        let cli = Cli::try_parse_from([
            "sheetfold",
            "grouped",
            "in.xlsx",
            "out.xlsx",
            "--skip-initial-lines",
            "2",
        ])
        .unwrap();

        match cli.command {
            Commands::Grouped { skip_rows, .. } => assert_eq!(skip_rows, Some(2)),
            _ => panic!("expected grouped command"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "sheetfold",
            "positional",
            "in.xlsx",
            "out.xlsx",
            "--config",
            "custom.toml",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_grouped_skip_rows_defaults_to_config() {
        let cli =
            Cli::try_parse_from(["sheetfold", "grouped", "in.xlsx", "out.xlsx"]).unwrap();

        match cli.command {
            Commands::Grouped { skip_rows, .. } => assert_eq!(skip_rows, None),
            _ => panic!("expected grouped command"),
        }
    }

    #[test]
    fn test_negative_skip_rows_rejected() {
        let result = Cli::try_parse_from([
            "sheetfold",
            "grouped",
            "in.xlsx",
            "out.xlsx",
            "--skip-rows",
            "-1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_settings_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("absent.toml");
        let err = load_settings(Some(config.as_path()), &dir.path().join("book.xlsx")).unwrap_err();

        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_settings_prefers_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("book.xlsx");
        fs::write(dir.path().join("sheetfold.toml"), "[grouped]\nskip_rows = 1\n").unwrap();
        let explicit = dir.path().join("other.toml");
        fs::write(&explicit, "[grouped]\nskip_rows = 4\n").unwrap();

        assert_eq!(load_settings(None, &input).unwrap().grouped.skip_rows, 1);
        assert_eq!(
            load_settings(Some(explicit.as_path()), &input)
                .unwrap()
                .grouped
                .skip_rows,
            4
        );
    }

    #[test]
    fn test_invalid_delimiter_is_reported() {
        let mut settings = Settings::default();
        settings.csv.delimiter = "ab".to_string();

        let err = merge_engine(&settings).unwrap_err();
        assert!(err.to_string().contains("Invalid CSV delimiter"));
    }
}
