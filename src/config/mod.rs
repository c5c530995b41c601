//! Configuration file management
//!
//! Loads the TOML configuration that fixes the boot-time terminal geometry,
//! the display color mode and the call serialization discipline.
//! Default config path: ~/.config/uicall/config.toml

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::terminal::{DisplayMode, TerminalState};
use crate::ui::SerializationKind;
use crate::utils::parse_packed_rgb;

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial terminal settings
    pub terminal: TerminalConfig,
    /// Display settings
    pub display: DisplayConfig,
    /// Dispatch settings
    pub dispatch: DispatchConfig,
}

/// Initial terminal settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Text rows (default: 25)
    pub rows: u32,
    /// Text columns (default: 80)
    pub cols: u32,
    /// Foreground color: palette index, or "RRGGBB" in rgb mode
    #[serde(deserialize_with = "deserialize_color")]
    pub foreground: u32,
    /// Background color: palette index, or "RRGGBB" in rgb mode
    #[serde(deserialize_with = "deserialize_color")]
    pub background: u32,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            rows: crate::constants::DEFAULT_ROWS,
            cols: crate::constants::DEFAULT_COLS,
            foreground: crate::constants::DEFAULT_FG,
            background: crate::constants::DEFAULT_BG,
        }
    }
}

/// Display settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Color mode: "text16" | "indexed256" | "rgb"
    pub mode: DisplayMode,
}

/// Dispatch settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// "single" (one execution context) or "spin" (spinlock, shared)
    pub serialization: SerializationKind,
}

/// Semantic config errors found after parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("terminal.{field} must be at least 1")]
    ZeroExtent { field: &'static str },

    #[error("terminal.{field} = {value} is outside the {mode:?} color range (max {max})")]
    ColorOutOfRange {
        field: &'static str,
        value: u32,
        mode: DisplayMode,
        max: u32,
    },
}

/// Color deserializer: accepts an integer or an "RRGGBB" hex string
fn deserialize_color<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct ColorVisitor;

    impl<'de> Visitor<'de> for ColorVisitor {
        type Value = u32;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a color index or an RRGGBB hex string")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u32::try_from(value).map_err(|_| E::custom(format!("color out of range: {}", value)))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u32::try_from(value).map_err(|_| E::custom(format!("color out of range: {}", value)))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            parse_packed_rgb(value).ok_or_else(|| E::custom(format!("invalid hex color: {}", value)))
        }
    }

    deserializer.deserialize_any(ColorVisitor)
}

impl Config {
    /// System-wide config path
    const SYSTEM_CONFIG_PATH: &'static str = "/etc/uicall/config.toml";

    /// Get the path that would be used for loading config
    /// Returns None if using built-in defaults
    pub fn config_path() -> Option<PathBuf> {
        // 1. UICALL_CONFIG environment variable
        if let Ok(path) = std::env::var("UICALL_CONFIG") {
            let p = Path::new(&path);
            if p.exists() {
                return Some(p.to_path_buf());
            }
            warn!("UICALL_CONFIG points to missing file: {}", path);
        }

        // 2. User config: ~/.config/uicall/config.toml
        if let Some(config_path) = default_config_path() {
            if config_path.exists() {
                return Some(config_path);
            }
        }

        // 3. System config: /etc/uicall/config.toml
        let system_config = Path::new(Self::SYSTEM_CONFIG_PATH);
        if system_config.exists() {
            return Some(system_config.to_path_buf());
        }

        None
    }

    /// Load configuration with priority:
    /// 1. UICALL_CONFIG environment variable
    /// 2. ~/.config/uicall/config.toml (user config)
    /// 3. /etc/uicall/config.toml (system config)
    /// 4. Built-in defaults
    ///
    /// A file that fails to parse or validate falls back to defaults.
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            match Self::load_from_file(&path) {
                Ok(config) => {
                    info!("Loaded config: {}", path.display());
                    return config;
                }
                Err(e) => {
                    warn!("Failed to load config {}: {:#}", path.display(), e);
                }
            }
        }
        info!("Using built-in default config");
        Self::default()
    }

    /// Load and validate settings from specified path
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse and validate TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML (for --dump-config / --init-config)
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Check settings that TOML types alone cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.terminal;
        if t.rows == 0 {
            return Err(ConfigError::ZeroExtent { field: "rows" });
        }
        if t.cols == 0 {
            return Err(ConfigError::ZeroExtent { field: "cols" });
        }

        let mode = self.display.mode;
        let max = mode.color_max();
        for (field, value) in [("foreground", t.foreground), ("background", t.background)] {
            if value > max {
                return Err(ConfigError::ColorOutOfRange {
                    field,
                    value,
                    mode,
                    max,
                });
            }
        }
        Ok(())
    }

    /// Boot-time terminal state described by this config
    pub fn initial_state(&self) -> Result<TerminalState, ConfigError> {
        self.validate()?;
        let t = &self.terminal;
        let mode = self.display.mode;
        // validate() has already range-checked both colors
        TerminalState::new(t.rows, t.cols, mode)
            .with_colors(t.foreground, t.background)
            .ok_or(ConfigError::ColorOutOfRange {
                field: "foreground",
                value: t.foreground,
                mode,
                max: mode.color_max(),
            })
    }

    /// Write the default config to the user config path
    pub fn write_default_config() -> Result<PathBuf> {
        let config_path =
            default_config_path().ok_or_else(|| anyhow::anyhow!("Config directory not found"))?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&config_path, Self::default().to_toml()?)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        info!("Wrote default config: {}", config_path.display());
        Ok(config_path)
    }
}

/// Get default config file path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("uicall").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.initial_state(), Ok(TerminalState::default()));
    }

    #[test]
    fn test_parse_sections() {
        let config = Config::from_toml(
            r#"
            [terminal]
            rows = 50
            cols = 132
            foreground = "ffcc00"
            background = 0

            [display]
            mode = "rgb"

            [dispatch]
            serialization = "spin"
            "#,
        )
        .unwrap();
        assert_eq!(config.terminal.foreground, 0xFFCC00);
        assert_eq!(config.dispatch.serialization, SerializationKind::Spin);

        let state = config.initial_state().unwrap();
        assert_eq!(state.cursor_row_max(), 49);
        assert_eq!(state.cursor_col_max(), 131);
        assert_eq!(state.fg_color(), 0xFFCC00);
    }

    #[test]
    fn test_rejects_color_outside_mode() {
        let err = Config::from_toml("[terminal]\nforeground = 16\n").unwrap_err();
        let err = err.downcast::<ConfigError>().unwrap();
        assert!(matches!(err, ConfigError::ColorOutOfRange { field: "foreground", .. }));
    }

    #[test]
    fn test_initial_state_rejects_unvalidated_colors() {
        let mut config = Config::default();
        config.terminal.background = 200;
        assert_eq!(
            config.initial_state(),
            Err(ConfigError::ColorOutOfRange {
                field: "background",
                value: 200,
                mode: DisplayMode::Text16,
                max: 15,
            })
        );
    }

    #[test]
    fn test_rejects_zero_rows() {
        assert!(Config::from_toml("[terminal]\nrows = 0\n").is_err());
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert!(Config::from_toml("[display]\nmode = \"cga\"\n").is_err());
    }

    #[test]
    fn test_toml_output_parses_back() {
        let text = Config::default().to_toml().unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), Config::default());
    }
}
