//! Client-side session state
//! Token persistence, route guarding, and the transient view state of the dashboard

pub mod board;
pub mod generator;
pub mod route;
pub mod skills;
pub mod token_store;

pub use board::QuestionBoard;
pub use generator::GeneratorForm;
pub use route::{Route, RouteGuard};
pub use skills::SkillSelection;
pub use token_store::{StoredSession, TokenStore};
