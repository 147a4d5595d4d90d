//! Configuration file discovery and loading

use std::fs;
use std::path::{Path, PathBuf};

use super::EngineConfig;
use crate::error::WeftError;
use crate::result::Result;

/// File names checked in each directory, in priority order
pub const CONFIG_FILE_NAMES: [&str; 4] = ["weft.yaml", "weft.yml", "weft.json", "weft.toml"];

/// Discovers and loads configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Walk up from `start_path` until a config file is found
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| WeftError::config_error(format!("Invalid path: {e}")))?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }

    /// Load and validate a config file; the format follows the extension
    pub fn load_from_file(path: &Path) -> Result<EngineConfig> {
        let content = fs::read_to_string(path).map_err(|e| WeftError::io_error(path, e))?;
        let failed = |e: &dyn std::fmt::Display| {
            WeftError::config_error(format!(
                "Failed to load config from '{}': {}",
                path.display(),
                e
            ))
        };

        let config: EngineConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| failed(&e))?,
            Some("json") => serde_json::from_str(&content).map_err(|e| failed(&e))?,
            Some("toml") => toml::from_str(&content).map_err(|e| failed(&e))?,
            _ => {
                return Err(WeftError::config_error(format!(
                    "Unsupported config file '{}' (expected .yaml, .yml, .json or .toml)",
                    path.display()
                )));
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Load `custom_path` if given, otherwise the discovered file, otherwise defaults
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<EngineConfig> {
        if let Some(path) = custom_path {
            if !path.exists() {
                return Err(WeftError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_from_file(path);
        }

        let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
        match Self::auto_discover(search_dir)? {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(EngineConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    fn create_temp_config(dir: &Path, filename: &str, content: &str) -> PathBuf {
        let path = dir.join(filename);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_each_format() {
        let temp_dir = TempDir::new().unwrap();
        let yaml = create_temp_config(temp_dir.path(), "a.yaml", "lineWidth: 60\napplyFixes: true\n");
        let json = create_temp_config(temp_dir.path(), "b.json", r#"{"indentWidth": 4}"#);
        let toml = create_temp_config(
            temp_dir.path(),
            "c.toml",
            "useTabs = true\nenabledCategories = [\"AST_ADD_SELF_CLOSING\"]\n",
        );

        let yaml = ConfigLoader::load_from_file(&yaml).unwrap();
        assert_eq!(yaml.line_width, 60);
        assert!(yaml.apply_fixes);

        let json = ConfigLoader::load_from_file(&json).unwrap();
        assert_eq!(json.indent_width, 4);

        let toml = ConfigLoader::load_from_file(&toml).unwrap();
        assert!(toml.use_tabs);
        assert!(toml.is_category_enabled("AST_ADD_SELF_CLOSING"));
        assert!(!toml.is_category_enabled("HTML_PREFER_SELF_CLOSING"));
    }

    #[test]
    fn test_auto_discover_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("src/nested");
        fs::create_dir_all(&nested).unwrap();
        create_temp_config(temp_dir.path(), "weft.json", r#"{"lineWidth": 120}"#);

        let found = ConfigLoader::auto_discover(&nested).unwrap();
        assert!(found.is_some_and(|p| p.ends_with("weft.json")));

        let config = ConfigLoader::load(None, Some(nested.as_path())).unwrap();
        assert_eq!(config.line_width, 120);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_temp_config(temp_dir.path(), "weft.yaml", "lineWidth: 0\n");
        let err = ConfigLoader::load_from_file(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_unsupported_extension_and_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_temp_config(temp_dir.path(), "weft.ini", "lineWidth=10");
        assert!(ConfigLoader::load_from_file(&path).is_err());

        let missing = temp_dir.path().join("missing.json");
        let err = ConfigLoader::load(Some(missing.as_path()), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
