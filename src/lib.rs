//! SkillMatrix client library

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod session;

pub use api::ApiClient;
pub use config::Config;
pub use error::{Result, SkillMatrixError};
