pub mod answer;
pub mod api;
pub mod auth;
pub mod clipboard;
pub mod comparison;
pub mod error;
pub mod notify;
pub mod session;

// Re-export common types
pub use answer::{AnswerRecord, HumanizedAnswer};
pub use api::ComparisonApi;
pub use error::{CompareError, Result};
pub use session::{Session, SessionStore, UserProfile};
