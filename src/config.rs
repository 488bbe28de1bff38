use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConvertError;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub body: BodyConfig,
    pub heading: HeadingConfig,
    pub code: CodeConfig,
    pub links: LinksConfig,
}

/// Document-wide body text. Registered as the default run style before any
/// content is added.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct BodyConfig {
    pub font: String,
    /// Point size
    pub size: usize,
    pub color: String,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            font: "宋体".to_string(),
            size: 14,
            color: "000000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HeadingConfig {
    pub font: String,
    /// Point size, shared by all heading levels
    pub size: usize,
    pub color: String,
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            font: "黑体".to_string(),
            size: 29,
            color: "000000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CodeConfig {
    /// Monospace family for inline code spans
    pub font: String,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            font: "Courier New".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LinksConfig {
    pub underline: bool,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self { underline: true }
    }
}

impl Config {
    /// The styling bundled with the binary.
    ///
    /// `build.rs` checks every key of the bundled file against the type read
    /// here, so parsing cannot fail in a built binary.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("default_config.toml is validated by build.rs")
    }

    /// Load config from a TOML file. Sections or keys missing from the file
    /// keep their default values.
    pub fn load(path: &Path) -> Result<Self, ConvertError> {
        let content = fs::read_to_string(path).map_err(|source| ConvertError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConvertError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Body size in half-points, the unit Word uses for run sizes.
    pub fn body_half_points(&self) -> usize {
        self.body.size * 2
    }

    pub fn heading_half_points(&self) -> usize {
        self.heading.size * 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn compiled_default_matches_struct_default() {
        assert_eq!(Config::compiled_default(), Config::default());
    }

    #[test]
    fn bundled_file_parses_strictly() {
        let parsed: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(parsed.is_ok(), "{:?}", parsed.err());
    }

    #[test]
    fn mistyped_size_is_rejected() {
        let parsed: Result<Config, _> = toml::from_str("[body]\nsize = \"14\"\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn compiled_default_values() {
        let config = Config::compiled_default();
        assert_eq!(config.body.font, "宋体");
        assert_eq!(config.body_half_points(), 28);
        assert_eq!(config.heading.font, "黑体");
        assert_eq!(config.heading_half_points(), 58);
        assert_eq!(config.code.font, "Courier New");
        assert!(config.links.underline);
    }

    #[test]
    fn load_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("style.toml");
        fs::write(&path, "[body]\nfont = \"Arial\"\n\n[links]\nunderline = false\n").unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.body.font, "Arial");
        assert_eq!(config.body.size, 14);
        assert!(!config.links.underline);
        assert_eq!(config.heading, HeadingConfig::default());
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.toml");

        let err = Config::load(&path).unwrap_err();

        assert!(matches!(err, ConvertError::ConfigRead { .. }));
    }

    #[test]
    fn load_invalid_toml_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.toml");
        fs::write(&path, "[body\nfont = ").unwrap();

        let err = Config::load(&path).unwrap_err();

        assert!(matches!(err, ConvertError::ConfigParse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }
}
