//! Job description sources: inline text or a `.txt`/`.md` file

use crate::error::{Result, SkillMatrixError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{normalize_whitespace, MarkdownExtractor, PlainTextExtractor, TextExtractor};
use log::info;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub enum JobDescriptionSource {
    None,
    Inline(String),
    File(PathBuf),
}

impl JobDescriptionSource {
    /// Build from the mutually exclusive `--job` / `--job-file` flags.
    pub fn from_args(inline: Option<String>, file: Option<PathBuf>) -> Result<Self> {
        match (inline, file) {
            (Some(_), Some(_)) => Err(SkillMatrixError::InvalidInput(
                "Use either --job or --job-file, not both".to_string(),
            )),
            (Some(text), None) => Ok(JobDescriptionSource::Inline(text)),
            (None, Some(path)) => Ok(JobDescriptionSource::File(path)),
            (None, None) => Ok(JobDescriptionSource::None),
        }
    }
}

pub struct JobDescriptionLoader;

impl JobDescriptionLoader {
    /// Resolve the source to text. A missing source yields an empty string.
    pub async fn load(source: &JobDescriptionSource) -> Result<String> {
        match source {
            JobDescriptionSource::None => Ok(String::new()),
            JobDescriptionSource::Inline(text) => Ok(normalize_whitespace(text)),
            JobDescriptionSource::File(path) => Self::load_file(path).await,
        }
    }

    async fn load_file(path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(SkillMatrixError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        match FileType::from_path(path) {
            FileType::Text => {
                info!("Reading job description: {}", path.display());
                PlainTextExtractor.extract(path).await
            }
            FileType::Markdown => {
                info!("Reading markdown job description: {}", path.display());
                MarkdownExtractor.extract(path).await
            }
            _ => Err(SkillMatrixError::UnsupportedFormat(format!(
                "Job description must be a .txt or .md file: {}",
                path.display()
            ))),
        }
    }
}
