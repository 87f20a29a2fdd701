//! Settings loader utilities

use crate::builder::ENV_PREFIX;
use crate::{ConfigBuilder, ConfigError, ConfigResult, Settings};
use std::path::{Path, PathBuf};

/// Settings loader with common loading patterns
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from the first settings file found in the current
    /// directory, then the environment
    pub fn load_default() -> ConfigResult<Settings> {
        let mut builder = ConfigBuilder::new().add_defaults();
        if let Some(path) = Self::config_exists() {
            builder = builder.add_source_file(path);
        }
        builder.add_env_prefix(ENV_PREFIX).build()
    }

    /// Load settings from a specific file, then the environment
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Settings> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Settings file not found",
                ),
            });
        }

        ConfigBuilder::new()
            .add_defaults()
            .add_source_file(path)
            .add_env_prefix(ENV_PREFIX)
            .build()
    }

    /// Save settings to a file, format taken from its extension
    pub fn save_to_file<P: AsRef<Path>>(settings: &Settings, path: P) -> ConfigResult<()> {
        let path = path.as_ref();

        let content = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::to_string_pretty(settings).map_err(|e| {
                ConfigError::serialization(format!("Failed to serialize to TOML: {}", e))
            })?,
            Some("json") => serde_json::to_string_pretty(settings).map_err(|e| {
                ConfigError::serialization(format!("Failed to serialize to JSON: {}", e))
            })?,
            _ => serde_yaml::to_string(settings).map_err(|e| {
                ConfigError::serialization(format!("Failed to serialize to YAML: {}", e))
            })?,
        };

        std::fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Write the default settings to `path`
    pub fn generate_default_file<P: AsRef<Path>>(path: P) -> ConfigResult<()> {
        Self::save_to_file(&Settings::default(), path)
    }

    /// First settings file present in the current directory
    pub fn config_exists() -> Option<PathBuf> {
        Self::default_config_paths()
            .into_iter()
            .find(|path| path.exists())
    }

    fn default_config_paths() -> Vec<PathBuf> {
        [
            "archstream.yaml",
            "archstream.yml",
            "archstream.toml",
            "archstream.json",
            ".archstream.yaml",
            ".archstream.toml",
        ]
        .iter()
        .map(PathBuf::from)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn test_load_default() {
        let settings = ConfigLoader::load_default().unwrap();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let error = ConfigLoader::load_from_file(temp_dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(error, ConfigError::Io { .. }));
    }

    #[rstest]
    #[case("settings.yaml")]
    #[case("settings.toml")]
    #[case("settings.json")]
    fn test_save_and_load(#[case] name: &str) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(name);

        let mut original = Settings::default();
        original.compression.level = 4;
        original.buffers.output_size = 8192;
        original.diagnostics.module_name = "restore".to_string();
        ConfigLoader::save_to_file(&original, &path).unwrap();

        let loaded = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_generate_default_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("default.yaml");

        ConfigLoader::generate_default_file(&path).unwrap();
        assert!(path.exists());

        let settings = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
