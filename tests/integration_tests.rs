//! Job description loading from local files

use skillmatrix::input::job_description::{JobDescriptionLoader, JobDescriptionSource};
use skillmatrix::input::text_extractor::{MarkdownExtractor, PlainTextExtractor, TextExtractor};
use skillmatrix::SkillMatrixError;
use std::path::{Path, PathBuf};

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let path = Path::new("tests/fixtures/sample_job.txt");

    let result = PlainTextExtractor.extract(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.starts_with("Senior Backend Engineer\n\nAcme Payments"));
    assert!(text.contains("- PostgreSQL and Redis in production"));
    assert!(!text.contains("\n\n\n"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let path = Path::new("tests/fixtures/sample_job.md");

    let text = MarkdownExtractor.extract(path).await.unwrap();
    assert!(text.contains("Senior Backend Engineer"));
    assert!(text.contains("hiring a backend engineer to own our settlement services."));
    assert!(text.contains("5+ years building services in Rust or Go"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
    assert!(!text.contains('`'));
}

#[tokio::test]
async fn test_loader_dispatches_on_extension() {
    let txt = JobDescriptionSource::File(PathBuf::from("tests/fixtures/sample_job.txt"));
    let md = JobDescriptionSource::File(PathBuf::from("tests/fixtures/sample_job.md"));

    let from_txt = JobDescriptionLoader::load(&txt).await.unwrap();
    let from_md = JobDescriptionLoader::load(&md).await.unwrap();
    assert!(from_txt.contains("Kubernetes"));
    assert!(from_md.contains("Kubernetes"));
    assert!(!from_md.contains('#'));
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let source = JobDescriptionSource::File(PathBuf::from("tests/fixtures/unsupported.xyz"));

    let result = JobDescriptionLoader::load(&source).await;
    assert!(matches!(result, Err(SkillMatrixError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let source = JobDescriptionSource::File(PathBuf::from("tests/fixtures/nonexistent.txt"));

    let result = JobDescriptionLoader::load(&source).await;
    assert!(matches!(result, Err(SkillMatrixError::InvalidInput(_))));
}
