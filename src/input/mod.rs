//! Input processing module
//! Handles file detection, upload validation, and job description loading

pub mod file_detector;
pub mod job_description;
pub mod text_extractor;
pub mod upload;
