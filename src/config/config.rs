use crate::data::filter_engine::DEFAULT_MAX_QUERY_LENGTH;
use crate::data::table::DirectionIndicators;
use crate::input::surfaces::DebouncePolicy;
use crate::ui::warning::DEFAULT_WARNING_DURATION_MS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub filter: FilterConfig,
    pub sort: SortConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Longest query that is applied; longer input is truncated
    pub max_query_length: usize,

    /// Quiet period after the last keystroke before filtering
    pub debounce_ms: u64,

    /// "unified" debounces both search fields, "mobile_immediate" filters
    /// mobile edits without waiting
    pub debounce_policy: DebouncePolicy,
}

/// Text columns always use German collation; only the glyphs are configurable
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    pub indicators: IndicatorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub neutral: String,
    pub ascending: String,
    pub descending: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// How long a warning stays on screen
    pub warning_duration_ms: u64,

    /// Below this terminal width the mobile search field is shown
    pub narrow_width: u16,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_query_length: DEFAULT_MAX_QUERY_LENGTH,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            debounce_policy: DebouncePolicy::Unified,
        }
    }
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        let defaults = DirectionIndicators::default();
        Self {
            neutral: defaults.neutral,
            ascending: defaults.ascending,
            descending: defaults.descending,
        }
    }
}

impl IndicatorConfig {
    pub fn to_indicators(&self) -> DirectionIndicators {
        DirectionIndicators {
            neutral: self.neutral.clone(),
            ascending: self.ascending.clone(),
            descending: self.descending.clone(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            warning_duration_ms: DEFAULT_WARNING_DURATION_MS,
            narrow_width: 80,
        }
    }
}

impl Config {
    /// Load config from the default location, falling back to defaults
    /// when no file exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            debug!(target: "config", "No config at {:?}, using defaults", config_path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Invalid config file: {:?}", config_path))?;

        debug!(target: "config", "Loaded config from {:?}", config_path);
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("table-lens").join("config.toml"))
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# table-lens Configuration File
# Location: ~/.config/table-lens/config.toml (Linux)
#           %APPDATA%\table-lens\config.toml (Windows)

[filter]
# Queries longer than this are cut back and not applied
max_query_length = 100

# Milliseconds of typing silence before the filter runs
debounce_ms = 300

# "unified": both search fields wait for the debounce
# "mobile_immediate": the narrow-layout field filters on every keystroke
debounce_policy = "unified"

# Text columns are compared with German collation, ignoring case and accents
[sort.indicators]
neutral = "↕"
ascending = "▲"
descending = "▼"

[display]
# How long warnings stay visible
warning_duration_ms = 3000

# Terminals narrower than this use the mobile search field
narrow_width = 80
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.filter.max_query_length, 100);
        assert_eq!(config.filter.debounce_ms, 300);
        assert_eq!(config.filter.debounce_policy, DebouncePolicy::Unified);
        assert_eq!(config.display.warning_duration_ms, 3000);
    }

    #[test]
    fn test_commented_default_parses_to_defaults() {
        let parsed: Config = toml::from_str(&Config::create_default_with_comments()).unwrap();
        let defaults = Config::default();
        assert_eq!(parsed.filter.max_query_length, defaults.filter.max_query_length);
        assert_eq!(parsed.sort.indicators.ascending, "▲");
        assert_eq!(parsed.display.narrow_width, defaults.display.narrow_width);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[filter]\ndebounce_policy = \"mobile_immediate\"").unwrap();
        file.flush().unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.filter.debounce_policy, DebouncePolicy::MobileImmediate);
        assert_eq!(config.filter.debounce_ms, 300);
    }

    #[test]
    fn test_generated_file_has_no_sort_locale() {
        let generated = Config::create_default_with_comments();
        assert!(!generated.contains("locale"));

        // Files written by older versions still load
        let parsed: Config = toml::from_str("[sort]\nlocale = \"de\"\n").unwrap();
        assert_eq!(parsed.sort.indicators.neutral, "↕");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[filter\nmax_query_length = ").unwrap();
        file.flush().unwrap();
        assert!(Config::load_from(file.path()).is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.filter.debounce_ms, parsed.filter.debounce_ms);
    }
}
