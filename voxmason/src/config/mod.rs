//! User configuration.
//!
//! The INI file at `~/.voxmason/config.ini` overlays built-in defaults:
//!
//! ```ini
//! [engine]
//! batch_size = 1000
//! run_timeout_ms = 30000
//!
//! [limits]
//! max_radius = 50
//! ```
//!
//! A missing file means defaults. Engine values outside their valid range
//! are clamped with a warning; unparseable values are errors.
//!
//! ```
//! use voxmason::config::ConfigFile;
//!
//! let config = ConfigFile::default();
//! let engine = config.engine_config();
//! assert_eq!(engine.batch_size, 1000);
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{
    default_log_file, DEFAULT_GRID_MAX_Y, DEFAULT_GRID_MIN_Y, MAX_BATCH_SIZE,
    MAX_CONCURRENT_BATCHES, MIN_BATCH_SIZE,
};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{ConfigFile, EngineSettings, GridSettings, LimitSettings, LoggingSettings};
