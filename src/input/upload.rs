//! Client-side checks for résumé uploads.
//!
//! The API client only accepts [`ResumeUpload`] and [`AnalysisUpload`], which
//! can only be built by the validators below, so an invalid file never
//! reaches the network.

use crate::error::{Result, SkillMatrixError};
use crate::input::file_detector::FileType;
use std::path::Path;
use tokio::fs;

/// A file read from disk, ready to be attached to a multipart form.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub file_type: FileType,
}

impl UploadFile {
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SkillMatrixError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let bytes = fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "resume".to_string());

        Ok(Self {
            name,
            bytes,
            file_type: FileType::from_path(path),
        })
    }

    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let file_type = FileType::from_path(Path::new(&name));
        Self { name, bytes, file_type }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// A résumé accepted for skill extraction.
#[derive(Debug, Clone)]
pub struct ResumeUpload(UploadFile);

impl ResumeUpload {
    pub fn file(&self) -> &UploadFile {
        &self.0
    }
}

/// A résumé plus job description accepted for ATS analysis.
#[derive(Debug, Clone)]
pub struct AnalysisUpload {
    file: UploadFile,
    job_description: String,
}

impl AnalysisUpload {
    pub fn file(&self) -> &UploadFile {
        &self.file
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }
}

/// PDF only, no larger than `max_bytes`.
pub fn validate_resume_upload(file: UploadFile, max_bytes: u64) -> Result<ResumeUpload> {
    check_resume(file.file_type, file.size(), max_bytes)?;
    Ok(ResumeUpload(file))
}

/// Read and validate a résumé from disk. Type and size are checked from the
/// path and file metadata first, so an oversized file is never buffered.
pub async fn load_resume_upload(path: &Path, max_bytes: u64) -> Result<ResumeUpload> {
    if !path.exists() {
        return Err(SkillMatrixError::InvalidInput(format!(
            "File does not exist: {}",
            path.display()
        )));
    }
    let size = fs::metadata(path).await?.len();
    check_resume(FileType::from_path(path), size, max_bytes)?;

    let file = UploadFile::load(path).await?;
    validate_resume_upload(file, max_bytes)
}

fn check_resume(file_type: FileType, size: u64, max_bytes: u64) -> Result<()> {
    if file_type != FileType::Pdf {
        return Err(SkillMatrixError::UnsupportedFormat("Only PDF files are allowed.".to_string()));
    }

    if size > max_bytes {
        return Err(SkillMatrixError::FileTooLarge(format!(
            "File size must be less than {}.",
            format_size_limit(max_bytes)
        )));
    }
    Ok(())
}

/// PDF or Word document, with a non-empty job description.
pub fn validate_analysis_upload(file: UploadFile, job_description: &str) -> Result<AnalysisUpload> {
    if !matches!(file.file_type, FileType::Pdf) && !file.file_type.is_word_document() {
        return Err(SkillMatrixError::UnsupportedFormat(
            "Please upload a PDF or Word document".to_string(),
        ));
    }

    let job_description = job_description.trim();
    if job_description.is_empty() {
        return Err(SkillMatrixError::InvalidInput(
            "Please upload a resume and provide a job description".to_string(),
        ));
    }

    Ok(AnalysisUpload {
        file,
        job_description: job_description.to_string(),
    })
}

fn format_size_limit(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{} bytes", bytes)
    }
}
