//! Configuration
//!
//! Settings are read from `sheetfold.toml`, either the file given with
//! `--config` or the one sitting next to the input workbook:
//!
//! ```toml
//! [grouped]
//! skip_rows = 1
//!
//! [output]
//! sheet_name = "Totals"
//!
//! [csv]
//! delimiter = ";"
//! trim = true
//! ```
//!
//! Command-line flags override values from the file.

mod settings;


pub use settings::{
    CsvSettings, GroupedSettings, OutputSettings, Settings, CONFIG_FILE_NAME,
};
