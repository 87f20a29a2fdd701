//! Settings builder layering defaults, files and environment

use crate::{ConfigError, ConfigResult, Settings};
use config::{ConfigBuilder as ConfigBuilderInner, Environment, File, FileFormat};
use std::path::{Path, PathBuf};

/// Environment prefix used by [`ConfigLoader`](crate::ConfigLoader)
pub const ENV_PREFIX: &str = "ARCHSTREAM";

/// Builder for loading settings from multiple sources
///
/// Sources apply in the order they were added; serialized defaults always
/// sit underneath. Missing files are skipped.
#[derive(Debug)]
pub struct ConfigBuilder {
    inner: ConfigBuilderInner<config::builder::DefaultState>,
    sources: Vec<SettingsSource>,
    env_separator: String,
}

#[derive(Debug, Clone)]
enum SettingsSource {
    File { path: PathBuf, format: FileFormat },
    Defaults,
    Environment { prefix: String },
}

impl ConfigBuilder {
    /// Create a new settings builder
    pub fn new() -> Self {
        Self {
            inner: config::Config::builder(),
            sources: Vec::new(),
            env_separator: "__".to_string(),
        }
    }

    /// Add default settings values
    pub fn add_defaults(mut self) -> Self {
        self.sources.push(SettingsSource::Defaults);
        self
    }

    /// Add a settings file, format taken from its extension
    pub fn add_source_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let format = detect_format(&path);
        self.sources.push(SettingsSource::File { path, format });
        self
    }

    /// Add a settings file with explicit format
    pub fn add_source_file_with_format<P: AsRef<Path>>(
        mut self,
        path: P,
        format: FileFormat,
    ) -> Self {
        let path = path.as_ref().to_path_buf();
        self.sources.push(SettingsSource::File { path, format });
        self
    }

    /// Add environment variables starting with `prefix`
    pub fn add_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.sources.push(SettingsSource::Environment {
            prefix: prefix.into(),
        });
        self
    }

    /// Set environment variable separator (default: "__")
    pub fn env_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.env_separator = separator.into();
        self
    }

    /// Build and validate the settings
    pub fn build(mut self) -> ConfigResult<Settings> {
        let defaults = serde_yaml::to_value(Settings::default()).map_err(|e| {
            ConfigError::serialization(format!("Failed to serialize defaults: {}", e))
        })?;
        self.inner = self.inner.add_source(config::Config::try_from(&defaults)?);

        for source in &self.sources {
            match source {
                SettingsSource::File { path, format } => {
                    if path.exists() {
                        self.inner = self
                            .inner
                            .add_source(File::from(path.clone()).format(*format));
                    }
                }
                SettingsSource::Environment { prefix } => {
                    self.inner = self.inner.add_source(
                        Environment::with_prefix(prefix)
                            .prefix_separator(&self.env_separator)
                            .separator(&self.env_separator)
                            .try_parsing(true),
                    );
                }
                SettingsSource::Defaults => {
                    // Always layered first above
                }
            }
        }

        let settings: Settings = self.inner.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Build the settings, falling back to defaults on any error
    pub fn build_or_default(self) -> Settings {
        self.build().unwrap_or_default()
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect file format from extension, YAML when unknown
pub(crate) fn detect_format(path: &Path) -> FileFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => FileFormat::Toml,
        Some("json") => FileFormat::Json,
        _ => FileFormat::Yaml,
    }
}
