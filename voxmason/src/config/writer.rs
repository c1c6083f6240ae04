//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! Produces the commented representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let engine = &config.engine;
    let limits = &config.limits;

    format!(
        r#"[engine]
; Maximum writes applied between deadline checks (default: 1000, range 1-100000)
batch_size = {}
; Applied writes between dirty-region notifications (default: 10000)
region_update_threshold = {}
; Wall-clock budget for one build in milliseconds (default: 30000)
; Writes not applied when it expires are dropped and reported as failed
run_timeout_ms = {}
; Batches applied at once by parallel builds (default: 4, range 1-64)
max_concurrent_batches = {}
; Region size as a power of two: regions are 2^shift cells wide (default: 4)
region_shift = {}

[limits]
; Largest circle or sphere radius accepted (default: 50)
max_radius = {}
; Tallest wall accepted (default: 50)
max_wall_height = {}
; Largest box / pyramid footprint, x by z (default: 30 x 30)
max_box_width = {}
max_box_depth = {}
; Tallest box / pyramid (default: 20)
max_box_height = {}
; Most cells any single shape may generate (default: 1000000)
max_cells = {}

[grid]
; Writable layers of the in-memory grid used by the CLI
min_y = {}
max_y = {}

[logging]
; Log file path (default: ~/.voxmason/voxmason.log)
file = {}
"#,
        engine.batch_size,
        engine.region_update_threshold,
        engine.run_timeout_ms,
        engine.max_concurrent_batches,
        engine.region_shift,
        limits.max_radius,
        limits.max_wall_height,
        limits.max_box_width,
        limits.max_box_depth,
        limits.max_box_height,
        limits.max_cells,
        config.grid.min_y,
        config.grid.max_y,
        path_to_string(&config.logging.file),
    )
}

/// Convert path to string, collapsing home dir to ~.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
