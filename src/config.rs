//! Configuration management for the SkillMatrix client

use crate::api::models::{Difficulty, ExperienceLevel};
use crate::error::{Result, SkillMatrixError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_MAX_RESUME_BYTES: u64 = 2 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub backend: BackendConfig,
    pub session: SessionConfig,
    pub upload: UploadConfig,
    pub output: OutputConfig,
    pub generator: GeneratorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub token_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub max_resume_bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub experience_level: ExperienceLevel,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        let token_file = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skillmatrix")
            .join("session.json");

        Self {
            backend: BackendConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout_secs: 120,
            },
            session: SessionConfig { token_file },
            upload: UploadConfig {
                max_resume_bytes: DEFAULT_MAX_RESUME_BYTES,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
            },
            generator: GeneratorConfig {
                experience_level: ExperienceLevel::Mid,
                difficulty: Difficulty::Medium,
            },
        }
    }
}

impl Config {
    /// Load from `path`, writing defaults on first use.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| SkillMatrixError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| SkillMatrixError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skillmatrix")
            .join("config.toml")
    }

    /// Apply a `section.key = value` assignment.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "backend.base_url" => {
                if !value.starts_with("http://") && !value.starts_with("https://") {
                    return Err(SkillMatrixError::Configuration(format!(
                        "base_url must start with http:// or https://, got '{}'",
                        value
                    )));
                }
                self.backend.base_url = value.trim_end_matches('/').to_string();
            }
            "backend.timeout_secs" => self.backend.timeout_secs = parse_number(key, value)?,
            "session.token_file" => self.session.token_file = PathBuf::from(value),
            "upload.max_resume_bytes" => self.upload.max_resume_bytes = parse_number(key, value)?,
            "output.format" => {
                self.output.format = crate::cli::parse_output_format(value)
                    .map_err(SkillMatrixError::Configuration)?;
            }
            "output.color_output" => {
                self.output.color_output = value.parse().map_err(|_| {
                    SkillMatrixError::Configuration(format!("{} expects true or false", key))
                })?;
            }
            "generator.experience_level" => {
                self.generator.experience_level = value.parse().map_err(SkillMatrixError::Configuration)?;
            }
            "generator.difficulty" => {
                self.generator.difficulty = value.parse().map_err(SkillMatrixError::Configuration)?;
            }
            _ => {
                return Err(SkillMatrixError::Configuration(format!("Unknown configuration key: {}", key)));
            }
        }
        Ok(())
    }

    /// Server URL precedence: explicit flag or env, then the config file.
    pub fn apply_server_override(&mut self, server: Option<&str>) {
        if let Some(url) = server {
            self.backend.base_url = url.trim_end_matches('/').to_string();
        }
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64> {
    value
        .parse()
        .map_err(|_| SkillMatrixError::Configuration(format!("{} expects a whole number, got '{}'", key, value)))
}
