//! Configuration for the `marga` command line tool.
//!
//! Settings are read from a TOML file. Every key is optional:
//!
//! ```toml
//! [output]
//! csv_path = "output/path_analysis.csv"
//!
//! [clearance]
//! search_radius = 10.0
//!
//! [map]
//! occupied_thresh_override = 0.5
//! ```
//!
//! ```rust,ignore
//! use marga::config::MargaConfig;
//!
//! let config = MargaConfig::load_or_default(Path::new("marga.toml"))?;
//! ```

mod defaults;
mod error;
mod settings;

pub use error::ConfigLoadError;
pub use settings::{ClearanceSection, MapSection, MargaConfig, OutputSection};
