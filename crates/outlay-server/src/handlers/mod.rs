//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod chat;
pub mod dashboard;
pub mod expenses;
pub mod export;
pub mod reports;
pub mod rules;

// Re-export all handlers for use in router
pub use chat::*;
pub use dashboard::*;
pub use expenses::*;
pub use export::*;
pub use reports::*;
pub use rules::*;
