use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    /// ConceptMap files loaded into the mapping store at startup
    #[serde(default)]
    pub mappings: MappingsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(format!("logging.level must be one of {valid_levels:?}"));
        }
        if self.mappings.files.iter().any(|f| f.trim().is_empty()) {
            return Err("mappings.files must not contain empty paths".into());
        }
        let fmt = self.output.format.to_ascii_lowercase();
        if !["json", "table"].contains(&fmt.as_str()) {
            return Err("output.format must be one of json, table".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}
fn default_log_level() -> String {
    "warn".into()
}
impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MappingsConfig {
    #[serde(default)]
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_format")]
    pub format: String,
}
fn default_output_format() -> String {
    "json".into()
}
impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_output_format(),
        }
    }
}

pub mod loader {
    use super::AppConfig;
    use config::{Config, Environment, File};
    use std::path::PathBuf;

    pub const DEFAULT_CONFIG_FILE: &str = "octofhir-tx.toml";

    /// Loads the configuration.
    ///
    /// An explicit `path` must exist. Without one, `octofhir-tx.toml` in the
    /// working directory is used if present. Environment variables such as
    /// `OCTOFHIR_TX__LOGGING__LEVEL=debug` override file values.
    pub fn load_config(path: Option<&str>) -> Result<AppConfig, String> {
        let mut builder = Config::builder();
        match path {
            Some(p) => {
                let pathbuf = PathBuf::from(p);
                if !pathbuf.exists() {
                    return Err(format!("config file not found: {p}"));
                }
                builder = builder.add_source(File::from(pathbuf));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    builder = builder.add_source(File::from(default_path));
                }
            }
        }
        // Environment variable overrides, e.g., OCTOFHIR_TX__OUTPUT__FORMAT=table
        builder = builder.add_source(
            Environment::with_prefix("OCTOFHIR_TX")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("mappings.files")
                .try_parsing(true),
        );
        let cfg = builder
            .build()
            .map_err(|e| format!("config build error: {e}"))?;
        let merged: AppConfig = cfg
            .try_deserialize()
            .map_err(|e| format!("config deserialize error: {e}"))?;
        merged.validate()?;
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.logging.level, "warn");
        assert_eq!(cfg.output.format, "json");
        assert!(cfg.mappings.files.is_empty());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut cfg = AppConfig::default();
        cfg.logging.level = "loud".into();
        assert!(cfg.validate().unwrap_err().contains("logging.level"));

        let mut cfg = AppConfig::default();
        cfg.output.format = "xml".into();
        assert!(cfg.validate().unwrap_err().contains("output.format"));

        let mut cfg = AppConfig::default();
        cfg.mappings.files.push("  ".into());
        assert!(cfg.validate().unwrap_err().contains("mappings.files"));
    }
}
