//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::{Ini, Properties};
use std::path::PathBuf;
use std::str::FromStr;

use super::defaults::{clamp_batch_size, clamp_concurrent_batches, clamp_region_shift};
use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [engine] section
    if let Some(section) = ini.section(Some("engine")) {
        if let Some(v) =
            parse_key::<usize>(section, "engine", "batch_size", "must be a positive integer")?
        {
            config.engine.batch_size = clamp_batch_size(v);
        }
        if let Some(v) = parse_positive::<usize>(
            section,
            "engine",
            "region_update_threshold",
            "must be a positive integer (applied writes)",
        )? {
            config.engine.region_update_threshold = v;
        }
        if let Some(v) = parse_positive::<u64>(
            section,
            "engine",
            "run_timeout_ms",
            "must be a positive integer (milliseconds)",
        )? {
            config.engine.run_timeout_ms = v;
        }
        if let Some(v) = parse_key::<usize>(
            section,
            "engine",
            "max_concurrent_batches",
            "must be a positive integer",
        )? {
            config.engine.max_concurrent_batches = clamp_concurrent_batches(v);
        }
        if let Some(v) = parse_key::<u32>(
            section,
            "engine",
            "region_shift",
            "must be a non-negative integer (bits)",
        )? {
            config.engine.region_shift = clamp_region_shift(v);
        }
    }

    // [limits] section
    if let Some(section) = ini.section(Some("limits")) {
        let limits = &mut config.limits;
        for (key, field) in [
            ("max_radius", &mut limits.max_radius),
            ("max_wall_height", &mut limits.max_wall_height),
            ("max_box_width", &mut limits.max_box_width),
            ("max_box_depth", &mut limits.max_box_depth),
            ("max_box_height", &mut limits.max_box_height),
        ] {
            if let Some(v) =
                parse_positive::<i32>(section, "limits", key, "must be a positive integer")?
            {
                *field = v;
            }
        }
        if let Some(v) =
            parse_positive::<u64>(section, "limits", "max_cells", "must be a positive integer")?
        {
            limits.max_cells = v;
        }
    }

    // [grid] section
    if let Some(section) = ini.section(Some("grid")) {
        if let Some(v) = parse_key::<i32>(section, "grid", "min_y", "must be an integer")? {
            config.grid.min_y = v;
        }
        if let Some(v) = parse_key::<i32>(section, "grid", "max_y", "must be an integer")? {
            config.grid.max_y = v;
        }
        if config.grid.min_y > config.grid.max_y {
            return Err(ConfigFileError::InvalidValue {
                section: "grid".to_string(),
                key: "min_y".to_string(),
                value: config.grid.min_y.to_string(),
                reason: format!("must not exceed max_y ({})", config.grid.max_y),
            });
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

/// Parse `key` from `section` if present.
fn parse_key<T: FromStr>(
    section: &Properties,
    section_name: &str,
    key: &str,
    reason: &str,
) -> Result<Option<T>, ConfigFileError> {
    match section.get(key) {
        None => Ok(None),
        Some(v) => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigFileError::InvalidValue {
                section: section_name.to_string(),
                key: key.to_string(),
                value: v.to_string(),
                reason: reason.to_string(),
            }),
    }
}

/// Like [`parse_key`], additionally rejecting zero and negative values.
fn parse_positive<T: FromStr + PartialOrd + Default>(
    section: &Properties,
    section_name: &str,
    key: &str,
    reason: &str,
) -> Result<Option<T>, ConfigFileError> {
    match parse_key::<T>(section, section_name, key, reason)? {
        Some(v) if v <= T::default() => Err(ConfigFileError::InvalidValue {
            section: section_name.to_string(),
            key: key.to_string(),
            value: section.get(key).unwrap_or_default().to_string(),
            reason: reason.to_string(),
        }),
        parsed => Ok(parsed),
    }
}

/// Expand a leading `~/` to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;
    use crate::config::settings::ConfigFile;
    use tempfile::TempDir;

    fn load(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, content).unwrap();
        ConfigFile::load_from(&config_path)
    }

    #[test]
    fn test_partial_config() {
        let config = load(
            r#"
[engine]
batch_size = 250
run_timeout_ms = 5000
"#,
        )
        .unwrap();

        assert_eq!(config.engine.batch_size, 250);
        assert_eq!(config.engine.run_timeout_ms, 5000);
        assert_eq!(config.engine.region_update_threshold, 10_000);
        assert_eq!(config.limits.max_radius, 50);
    }

    #[test]
    fn test_invalid_batch_size() {
        let err = load(
            r#"
[engine]
batch_size = lots
"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("engine.batch_size"));
        assert!(err.to_string().contains("'lots'"));
    }

    #[test]
    fn test_batch_size_clamped() {
        let config = load(
            r#"
[engine]
batch_size = 5000000
max_concurrent_batches = 0
region_shift = 31
"#,
        )
        .unwrap();

        assert_eq!(config.engine.batch_size, MAX_BATCH_SIZE);
        assert_eq!(config.engine.max_concurrent_batches, 1);
        assert_eq!(config.engine.region_shift, 16);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = load(
            r#"
[engine]
run_timeout_ms = 0
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigFileError::InvalidValue { ref key, .. } if key == "run_timeout_ms"));
    }

    #[test]
    fn test_limits_section() {
        let config = load(
            r#"
[limits]
max_radius = 20
max_box_height = 64
max_cells = 5000
"#,
        )
        .unwrap();

        assert_eq!(config.limits.max_radius, 20);
        assert_eq!(config.limits.max_box_height, 64);
        assert_eq!(config.limits.max_box_width, crate::builder::DEFAULT_MAX_BOX_WIDTH);
        assert_eq!(config.limits.max_cells, 5000);
    }

    #[test]
    fn test_negative_limit_rejected() {
        let err = load(
            r#"
[limits]
max_wall_height = -3
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("limits.max_wall_height"));
    }

    #[test]
    fn test_grid_bounds_order() {
        let err = load(
            r#"
[grid]
min_y = 100
max_y = 0
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("must not exceed max_y"));

        let config = load(
            r#"
[grid]
min_y = 0
max_y = 255
"#,
        )
        .unwrap();
        assert_eq!((config.grid.min_y, config.grid.max_y), (0, 255));
    }

    #[test]
    fn test_logging_file() {
        let config = load(
            r#"
[logging]
file = /var/log/voxmason.log
"#,
        )
        .unwrap();
        assert_eq!(config.logging.file, PathBuf::from("/var/log/voxmason.log"));
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/builds/log.txt");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("builds/log.txt"));
        }
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
    }
}
