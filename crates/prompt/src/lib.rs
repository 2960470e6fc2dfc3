//! Prompt system for the school notice generator.
//!
//! This crate holds everything between the caller's fields and the model:
//! - Field resolution from free-text key details
//! - The notice type catalog and its YAML extension file
//! - Handlebars rendering of the instruction block and the field summary
//! - The optional HTML document envelope and issue-date clock

pub mod builder;
pub mod catalog;
pub mod clock;
pub mod envelope;
pub mod loader;
pub mod resolver;
pub mod types;

// Re-export main types
pub use builder::{build_prompt, PromptOptions, GENERIC_TONE_CLAUSE};
pub use catalog::NoticeTypeCatalog;
pub use clock::{format_issue_date, Clock, FixedClock, SystemClock};
pub use envelope::{document_title, wrap_document};
pub use loader::load_catalog;
pub use resolver::resolve_fields;
pub use types::{
    notice_heading, present, BuiltPrompt, BuiltPromptMetadata, NoticeFields, TrackedField,
};
