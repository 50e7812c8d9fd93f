//! Backend API module
//! Typed wire models and the HTTP client for every SkillMatrix endpoint

pub mod client;
pub mod models;

pub use client::ApiClient;
