//! User defaults — TOML-based, platform-aware paths.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::{Rgb, parse_color};
use crate::protocol::MAX_VOLUME;

/// Header comment prepended to saved config files.
const CONFIG_HEADER: &str =
    "# Blynclight configuration for `blync`. Run `blync config` to check it.\n\n";

/// Flash speeds the light firmware distinguishes.
pub const FLASH_SPEED_RANGE: std::ops::RangeInclusive<u8> = 1..=7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Device index used when `--light` is not given. Default: 0.
    #[serde(default)]
    pub light: u8,

    /// Color for `blync on` without an argument (hex or name). Default: "green".
    #[serde(default = "default_color")]
    pub color: String,

    /// Flash speed for `blync on --flash`. Default: 1 (slowest).
    #[serde(default = "default_flash_speed")]
    pub flash_speed: u8,

    /// Tone volume for `blync music play`. Default: 5.
    #[serde(default = "default_volume")]
    pub volume: u8,
}

fn default_color() -> String {
    "green".into()
}
fn default_flash_speed() -> u8 {
    1
}
fn default_volume() -> u8 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Config {
            light: 0,
            color: default_color(),
            flash_speed: default_flash_speed(),
            volume: default_volume(),
        }
    }
}

/// Validation errors that [`Config::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The `color` field could not be parsed as a valid color.
    InvalidColor(String),
    /// `flash_speed` is outside [`FLASH_SPEED_RANGE`].
    InvalidFlashSpeed(u8),
    /// `volume` is above [`MAX_VOLUME`].
    InvalidVolume(u8),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidColor(e) => write!(f, "Invalid color: {e}"),
            ValidationError::InvalidFlashSpeed(n) => write!(
                f,
                "Invalid flash_speed: {n} (expected {}..={})",
                FLASH_SPEED_RANGE.start(),
                FLASH_SPEED_RANGE.end()
            ),
            ValidationError::InvalidVolume(n) => {
                write!(f, "Invalid volume: {n} (expected 0..={MAX_VOLUME})")
            }
        }
    }
}

impl Config {
    /// Platform-specific config directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("blynclight"))
    }

    /// Full path to config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Load config from disk, or return defaults if not found.
    pub fn load() -> Self {
        let (config, warnings) = Self::load_with_warnings();
        for w in &warnings {
            log::warn!("{w}");
        }
        config
    }

    /// Save config to an arbitrary path atomically (write to temp file, then rename).
    ///
    /// A header comment is prepended.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        let contents = format!("{CONFIG_HEADER}{serialized}");
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &contents)?;
        match std::fs::rename(&tmp, path) {
            Ok(()) => Ok(()),
            Err(_) => {
                // Rename can fail across filesystems; fall back to direct write + cleanup
                let result = std::fs::write(path, &contents);
                let _ = std::fs::remove_file(&tmp);
                result
            }
        }
    }

    /// Load config from an arbitrary path, returning the config and any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, vec![]),
                Err(e) => {
                    let warning = format!(
                        "config parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Load config from the default path, returning the config and any parse warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// The default color, parsed.
    pub fn color(&self) -> crate::error::Result<Rgb> {
        parse_color(&self.color)
    }

    /// Validate the entire config, collecting all errors.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = parse_color(&self.color) {
            errors.push(ValidationError::InvalidColor(e.to_string()));
        }
        if !FLASH_SPEED_RANGE.contains(&self.flash_speed) {
            errors.push(ValidationError::InvalidFlashSpeed(self.flash_speed));
        }
        if self.volume > MAX_VOLUME {
            errors.push(ValidationError::InvalidVolume(self.volume));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Replace every field that fails [`Config::validate`] with its default,
    /// returning the errors that triggered a replacement.
    pub fn sanitized(mut self) -> (Self, Vec<ValidationError>) {
        let errors = match self.validate() {
            Ok(()) => return (self, vec![]),
            Err(errors) => errors,
        };
        for e in &errors {
            match e {
                ValidationError::InvalidColor(_) => self.color = default_color(),
                ValidationError::InvalidFlashSpeed(_) => self.flash_speed = default_flash_speed(),
                ValidationError::InvalidVolume(_) => self.volume = default_volume(),
            }
        }
        (self, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── defaults ──

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.light, 0);
        assert_eq!(c.color, "green");
        assert_eq!(c.flash_speed, 1);
        assert_eq!(c.volume, 5);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let c: Config = toml::from_str("color = \"#0000FF\"").unwrap();
        assert_eq!(c.color, "#0000FF");
        assert_eq!(c.light, 0);
        assert_eq!(c.flash_speed, 1);
        assert_eq!(c.volume, 5);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let c: Config = toml::from_str("").unwrap();
        assert_eq!(c, Config::default());
    }

    #[test]
    fn wrong_type_toml_is_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("light = \"first\"");
        assert!(result.is_err());
    }

    #[test]
    fn negative_light_is_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("light = -1");
        assert!(result.is_err());
    }

    #[test]
    fn config_path_ends_with_toml() {
        if let Some(path) = Config::path() {
            assert_eq!(path.file_name().unwrap(), "config.toml");
            assert!(path.parent().unwrap().ends_with("blynclight"));
        }
    }

    #[test]
    fn color_resolves() {
        let c = Config {
            color: "#102030".into(),
            ..Config::default()
        };
        assert_eq!(c.color().unwrap(), Rgb::new(0x10, 0x20, 0x30));
        assert_eq!(Config::default().color().unwrap(), Rgb::new(0, 255, 0));
    }

    // ── validate ──

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_invalid_color() {
        let c = Config {
            color: "chartreuse".into(),
            ..Config::default()
        };
        let errs = c.validate().unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], ValidationError::InvalidColor(_)));
        assert!(errs[0].to_string().starts_with("Invalid color: "));
    }

    #[test]
    fn validate_flash_speed_bounds() {
        for speed in [1, 4, 7] {
            let c = Config {
                flash_speed: speed,
                ..Config::default()
            };
            assert!(c.validate().is_ok(), "speed {speed}");
        }
        for speed in [0, 8, 255] {
            let c = Config {
                flash_speed: speed,
                ..Config::default()
            };
            assert_eq!(
                c.validate().unwrap_err(),
                vec![ValidationError::InvalidFlashSpeed(speed)]
            );
        }
    }

    #[test]
    fn validate_volume_bounds() {
        let c = Config {
            volume: 10,
            ..Config::default()
        };
        assert!(c.validate().is_ok());
        let c = Config {
            volume: 11,
            ..Config::default()
        };
        assert_eq!(
            c.validate().unwrap_err(),
            vec![ValidationError::InvalidVolume(11)]
        );
    }

    #[test]
    fn validate_collects_multiple_errors() {
        let c = Config {
            light: 3,
            color: "not-a-color".into(),
            flash_speed: 0,
            volume: 99,
        };
        let errs = c.validate().unwrap_err();
        assert_eq!(errs.len(), 3);
        assert!(matches!(errs[0], ValidationError::InvalidColor(_)));
        assert_eq!(errs[1], ValidationError::InvalidFlashSpeed(0));
        assert_eq!(errs[2], ValidationError::InvalidVolume(99));
    }

    #[test]
    fn validation_error_display() {
        assert_eq!(
            ValidationError::InvalidFlashSpeed(9).to_string(),
            "Invalid flash_speed: 9 (expected 1..=7)"
        );
        assert_eq!(
            ValidationError::InvalidVolume(12).to_string(),
            "Invalid volume: 12 (expected 0..=10)"
        );
    }

    // ── sanitized ──

    #[test]
    fn sanitized_valid_config_is_unchanged() {
        let c = Config {
            light: 1,
            color: "red".into(),
            flash_speed: 7,
            volume: 0,
        };
        let (sanitized, errors) = c.clone().sanitized();
        assert!(errors.is_empty());
        assert_eq!(sanitized, c);
    }

    #[test]
    fn sanitized_replaces_only_invalid_fields() {
        let c = Config {
            light: 2,
            color: "#0000FF".into(),
            flash_speed: 9,
            volume: 11,
        };
        let (sanitized, errors) = c.sanitized();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidFlashSpeed(9),
                ValidationError::InvalidVolume(11)
            ]
        );
        assert_eq!(sanitized.light, 2);
        assert_eq!(sanitized.color, "#0000FF");
        assert_eq!(sanitized.flash_speed, 1);
        assert_eq!(sanitized.volume, 5);
    }

    #[test]
    fn sanitized_bad_color_falls_back_to_green() {
        let c = Config {
            color: "mauve-ish".into(),
            ..Config::default()
        };
        let (sanitized, errors) = c.sanitized();
        assert_eq!(errors.len(), 1);
        assert_eq!(sanitized.color().unwrap(), Rgb::new(0, 255, 0));
    }

    // ── save_to / load_from ──

    #[test]
    fn save_to_load_from_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config {
            light: 2,
            color: "#FF7F00".into(),
            flash_speed: 4,
            volume: 8,
        };
        config.save_to(&path).unwrap();

        let (loaded, warnings) = Config::load_from(&path);
        assert!(warnings.is_empty());
        assert_eq!(loaded, config);
    }

    #[test]
    fn save_to_includes_header_comment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        Config::default().save_to(&path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(
            contents.starts_with("# Blynclight configuration"),
            "saved file should start with header comment"
        );
    }

    #[test]
    fn save_to_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("config.toml");

        Config::default().save_to(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn save_to_cleans_up_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        Config::default().save_to(&path).unwrap();
        let tmp = dir.path().join("config.toml.tmp");
        assert!(!tmp.exists(), "temp file should not remain after save");
    }

    #[test]
    fn load_from_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nonexistent.toml");

        let (config, warnings) = Config::load_from(&path);
        assert!(warnings.is_empty());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_from_invalid_toml_returns_defaults_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "this is { not valid toml").unwrap();

        let (config, warnings) = Config::load_from(&path);
        assert_eq!(config, Config::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("config parse error"), "got: {}", warnings[0]);
    }

    #[test]
    fn load_from_out_of_range_values_loads_and_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "flash_speed = 9\nvolume = 20\n").unwrap();

        let (config, warnings) = Config::load_from(&path);
        assert!(warnings.is_empty());
        assert_eq!(config.flash_speed, 9);
        assert_eq!(config.validate().unwrap_err().len(), 2);
    }
}
