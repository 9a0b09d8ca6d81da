//! Configuration file loading and environment variable handling.
//!
//! Precedence: CLI args > Environment vars > Config file > Defaults

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Default config file content for `--config-init`.
pub const DEFAULT_CONFIG: &str = r#"# Whenspan configuration
# See: wspan --help for all options

# Always show every candidate interpretation (as if --all were passed)
all = false

# Disable colored output
no_color = false

# Fixed reference date for relative expressions (YYYY-MM-DD).
# Leave commented out to use today's date.
# reference = "2025-06-15"
"#;

/// Configuration loaded from file and environment.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub all: Option<bool>,
    pub no_color: Option<bool>,
    pub reference: Option<String>,
}

impl Config {
    /// Get the config file path.
    ///
    /// - Linux/macOS: `~/.config/wspan/config.toml`
    /// - Windows: `%APPDATA%\wspan\config.toml`
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("wspan").join("config.toml"))
    }

    /// Load config from file. Returns default if file doesn't exist.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };

        let Ok(contents) = fs::read_to_string(&path) else {
            return Self::default();
        };

        toml::from_str(&contents).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Read value from environment variable.
    fn env_var<T: std::str::FromStr>(name: &str) -> Option<T> {
        std::env::var(name).ok()?.parse().ok()
    }

    /// Get all with precedence: env > config > default.
    pub fn all(&self) -> bool {
        Self::env_var("WSPAN_ALL").or(self.all).unwrap_or(false)
    }

    /// Get no_color with precedence: env > config > default.
    ///
    /// Respects the `NO_COLOR` standard (https://no-color.org/).
    pub fn no_color(&self) -> bool {
        // NO_COLOR is a standard - presence means disable color
        if std::env::var("NO_COLOR").is_ok() {
            return true;
        }
        if std::env::var("WSPAN_NO_COLOR").is_ok() {
            return true;
        }
        self.no_color.unwrap_or(false)
    }

    /// Get reference date string with precedence: env > config.
    ///
    /// Returns `None` when neither is set; the caller falls back to today.
    /// Validation happens at the caller, so a malformed date in the config
    /// file is reported instead of silently ignored.
    pub fn reference(&self) -> Option<String> {
        std::env::var("WSPAN_REFERENCE")
            .ok()
            .or_else(|| self.reference.clone())
    }
}

/// Create a default config file at the standard location.
pub fn init_config() -> Result<PathBuf, String> {
    let path = Config::path().ok_or("Cannot determine config directory")?;

    if path.exists() {
        return Err(format!("Config file already exists: {}", path.display()));
    }

    // Create parent directory
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("Failed to create directory: {}", e))?;
    }

    fs::write(&path, DEFAULT_CONFIG).map_err(|e| format!("Failed to write config: {}", e))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid_toml() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).expect("DEFAULT_CONFIG should parse");
        assert_eq!(config.all, Some(false));
        assert_eq!(config.no_color, Some(false));
        // reference ships commented out
        assert_eq!(config.reference, None);
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
reference = "2025-06-15"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.reference, Some("2025-06-15".to_string()));
        assert_eq!(config.all, None);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.all, None);
        assert_eq!(config.no_color, None);
        assert_eq!(config.reference, None);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let toml = r#"
no_color = true
limit = 10
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.no_color, Some(true));
    }
}
