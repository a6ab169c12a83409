use config::{Config, ConfigError, File};
use extractors::{DocConverter, PipelineOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ScraperConfig {
    pub workspace: Option<WorkspaceConfig>,
    pub logging: Option<LoggingConfig>,
    pub doc: Option<DocConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct WorkspaceConfig {
    /// Parent of the per-run working directories; system temp dir when unset
    pub root: Option<PathBuf>,
    #[serde(default)]
    pub keep: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LoggingConfig {
    pub file: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct DocConfig {
    #[serde(default)]
    pub converter: DocConverter,
    pub binary: Option<String>,
}

const DEFAULT_CONFIG: &str = r#"
[workspace]
# root = "/var/tmp/cv-scraper"
keep = false

[logging]
file = "cv-scraper.log"

[doc]
# "antiword" or "libreoffice"
converter = "antiword"
# binary = "/usr/bin/antiword"
"#;

impl ScraperConfig {
    /// Load from `path`, or from the default location, creating a commented
    /// default file there when none exists yet.
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default_path = get_config_path();
                write_default_config(&default_path)?;
                default_path
            }
        };

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .build()?;

        let config: ScraperConfig = builder.try_deserialize()?;

        Ok((config, config_path))
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.logging.as_ref().and_then(|l| l.file.as_deref())
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        let mut options = PipelineOptions::default();

        if let Some(workspace) = &self.workspace {
            if let Some(root) = &workspace.root {
                options.work_root = root.clone();
            }
            options.keep_workspace = workspace.keep;
        }

        if let Some(doc) = &self.doc {
            options.doc_converter = doc.converter;
            options.doc_converter_binary = doc.binary.clone();
        }

        options
    }
}

fn write_default_config(config_path: &Path) -> Result<(), ConfigError> {
    if config_path.exists() {
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::Message(format!("Failed to create config directory: {e}"))
        })?;
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .map_err(|e| ConfigError::Message(format!("Failed to write default config: {e}")))
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("cv-scraper").join("config.toml")
    } else {
        PathBuf::from("cv-scraper.toml")
    }
}
