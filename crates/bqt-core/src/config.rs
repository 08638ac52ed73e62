// ABOUTME: Tool settings for reading layout files.
// ABOUTME: Loads and saves the symbol alphabet and sort order from TOML.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Region attribute used when ordering a frame's regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// The region's type symbol
    Type,
    /// Top-left corner, compared row first
    Origin,
    /// (height, width)
    Extent,
}

impl SortKey {
    pub fn default_order() -> Vec<SortKey> {
        vec![SortKey::Type, SortKey::Origin, SortKey::Extent]
    }

    /// Parse a comma separated list such as `"origin, type"`.
    pub fn parse_list(list: &str) -> Result<Vec<SortKey>, ConfigError> {
        let keys = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(SortKey::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        if keys.is_empty() {
            return Err(ConfigError::UnknownSortKey(list.to_string()));
        }
        Ok(keys)
    }
}

impl FromStr for SortKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "type" => Ok(SortKey::Type),
            "origin" | "pos" => Ok(SortKey::Origin),
            "extent" | "dims" => Ok(SortKey::Extent),
            _ => Err(ConfigError::UnknownSortKey(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Symbols that mark region content. Everything else is filler.
    pub type_symbols: String,

    /// Border marker for expansion lines
    pub cut_symbol: char,

    /// Default region order when a frame does not set `sort`
    pub region_sort_order: Vec<SortKey>,

    /// Header prefix in front of each frame name (6 characters)
    pub frame_header: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            type_symbols: "AaBbLl".to_string(),
            cut_symbol: 'X',
            region_sort_order: SortKey::default_order(),
            frame_header: "FRAME ".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read settings file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Unknown region sort key: {0:?}")]
    UnknownSortKey(String),

    #[error("Invalid symbol alphabet: {0}")]
    InvalidAlphabet(String),
}

impl Settings {
    /// Get the default settings path (~/.config/bouquet/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("bouquet").join("config.toml"))
    }

    /// Load settings from a path
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from default path, or return defaults if not found
    pub fn load_or_default() -> Self {
        Self::default_path()
            .and_then(|path| Self::load(&path).ok())
            .unwrap_or_default()
    }

    /// Save settings to a path
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The alphabet must be non-empty, whitespace free, and must not contain
    /// the cut symbol.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.type_symbols.is_empty() {
            return Err(ConfigError::InvalidAlphabet(
                "no type symbols configured".to_string(),
            ));
        }
        if let Some(c) = self.type_symbols.chars().find(|c| c.is_whitespace()) {
            return Err(ConfigError::InvalidAlphabet(format!(
                "whitespace {c:?} cannot be a type symbol"
            )));
        }
        if self.type_symbols.contains(self.cut_symbol) {
            return Err(ConfigError::InvalidAlphabet(format!(
                "cut symbol {:?} is also a type symbol",
                self.cut_symbol
            )));
        }
        if self.cut_symbol.is_whitespace() {
            return Err(ConfigError::InvalidAlphabet(
                "cut symbol cannot be whitespace".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_type_symbol(&self, c: char) -> bool {
        self.type_symbols.contains(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_file_format() {
        let settings = Settings::default();
        assert_eq!(settings.cut_symbol, 'X');
        assert!(settings.is_type_symbol('a'));
        assert!(settings.is_type_symbol('L'));
        assert!(!settings.is_type_symbol('X'));
        assert_eq!(settings.frame_header.chars().count(), 6);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn parses_sort_lists() {
        assert_eq!(
            SortKey::parse_list("origin, TYPE").unwrap(),
            vec![SortKey::Origin, SortKey::Type]
        );
        assert_eq!(
            SortKey::parse_list("pos,dims").unwrap(),
            vec![SortKey::Origin, SortKey::Extent]
        );
        assert!(SortKey::parse_list("area").is_err());
        assert!(SortKey::parse_list(" , ").is_err());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let settings: Settings = toml::from_str("cut_symbol = \"#\"").unwrap();
        assert_eq!(settings.cut_symbol, '#');
        assert_eq!(settings.type_symbols, "AaBbLl");
        assert_eq!(settings.region_sort_order, SortKey::default_order());
    }

    #[test]
    fn rejects_cut_symbol_in_alphabet() {
        let settings = Settings {
            type_symbols: "ABX".to_string(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidAlphabet(_))
        ));
    }

    #[test]
    fn settings_roundtrip() {
        let settings = Settings {
            type_symbols: "PQ".to_string(),
            region_sort_order: vec![SortKey::Extent],
            ..Settings::default()
        };

        let temp_path = std::env::temp_dir().join("bqt_settings_roundtrip.toml");
        settings.save(&temp_path).unwrap();
        let loaded = Settings::load(&temp_path).unwrap();
        assert_eq!(loaded, settings);

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_default_path() {
        if let Some(p) = Settings::default_path() {
            assert!(p.ends_with("bouquet/config.toml"));
        }
    }
}
