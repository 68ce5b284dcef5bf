//! sheetfold CLI - Command-line interface library
//!
//! This library provides the CLI functionality for sheetfold:
//! - Positional: sum every sheet of a workbook cell by cell
//! - Grouped: merge rows that share a leading key across sheets
//! - Sheets: list the sheets of a workbook
//!
//! # Library Usage
//!
//! ```ignore
//! use sheetfold_cli::{grouped_command, run_cli};
//!
//! // Run the full CLI
//! run_cli()?;
//!
//! // Or use individual commands programmatically
//! grouped_command(&input, &output, Some(1), None)?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Cell-by-cell totals of every sheet
//! sheetfold positional monthly.xlsx total.xlsx
//!
//! # Row totals by item, keeping a one-line header
//! sheetfold grouped monthly.xlsx by_item.xlsx --skip-rows 1
//!
//! # Sheet names, in order
//! sheetfold sheets monthly.xlsx
//! ```

pub mod app;
pub mod config;

// Re-export main entry point and commands
pub use app::{grouped_command, positional_command, run_cli, sheets_command};
pub use config::{CsvSettings, GroupedSettings, OutputSettings, Settings, CONFIG_FILE_NAME};
