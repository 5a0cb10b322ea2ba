use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::doc::printer::PrintOptions;

/// Formatting settings, read from `config.toml`.
///
/// Every field has a default so partial files are accepted:
///
/// ```toml
/// print_width = 100
///
/// [sql]
/// keyword_case = "upper"
/// indent_width = 4
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Target line width for the host printer.
    pub print_width: usize,
    /// Spaces per indentation level in the host printer.
    pub tab_width: usize,
    pub use_tabs: bool,
    /// Options handed to the embedded SQL formatter.
    pub sql: SqlConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SqlConfig {
    pub keyword_case: KeywordCase,
    pub indent_width: u8,
    pub use_tabs: bool,
    /// Blank lines emitted between consecutive statements.
    pub lines_between_queries: u8,
}

/// Case applied to reserved SQL keywords.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum KeywordCase {
    Upper,
    Lower,
    #[default]
    Preserve,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            print_width: 80,
            tab_width: 2,
            use_tabs: false,
            sql: SqlConfig::default(),
        }
    }
}

impl Default for SqlConfig {
    fn default() -> Self {
        Self {
            keyword_case: KeywordCase::Preserve,
            indent_width: 2,
            use_tabs: false,
            lines_between_queries: 1,
        }
    }
}

impl Config {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sqlembed")
            .join("config.toml")
    }

    /// Load the user config file, falling back to defaults when it is absent.
    pub fn load_default() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Options for rendering documents to text.
    pub fn print_options(&self) -> PrintOptions {
        PrintOptions {
            width: self.print_width,
            tab_width: self.tab_width,
            use_tabs: self.use_tabs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.print_width, 80);
        assert_eq!(config.tab_width, 2);
        assert_eq!(config.sql.keyword_case, KeywordCase::Preserve);
        assert_eq!(config.sql.lines_between_queries, 1);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str("print_width = 100\n[sql]\nkeyword_case = \"upper\"\n")
            .unwrap();
        assert_eq!(config.print_width, 100);
        assert_eq!(config.tab_width, 2);
        assert_eq!(config.sql.keyword_case, KeywordCase::Upper);
        assert_eq!(config.sql.indent_width, 2);
    }

    #[test]
    fn test_invalid_keyword_case_rejected() {
        assert!(Config::from_toml_str("[sql]\nkeyword_case = \"shouting\"\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "use_tabs = true\n[sql]\nindent_width = 4").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert!(config.use_tabs);
        assert_eq!(config.sql.indent_width, 4);
        assert!(config.print_options().use_tabs);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[test]
    fn test_config_path_ends_with_crate_dir() {
        let path = Config::config_path();
        assert!(path.ends_with("sqlembed/config.toml"));
    }
}
