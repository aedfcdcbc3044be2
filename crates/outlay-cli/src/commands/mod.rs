//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `chat` - Expense bot (interactive session and one-shot messages)
//! - `core` - Core commands (init, seed) and shared utilities (open_db, load_rules)
//! - `expenses` - Recording and listing expenses
//! - `export` - CSV export command
//! - `reports` - Summary, forecast and dashboard commands
//! - `rules` - Category keyword rule commands
//! - `serve` - Web server command

pub mod chat;
pub mod core;
pub mod expenses;
pub mod export;
pub mod reports;
pub mod rules;
pub mod serve;

// Re-export command functions for main.rs
pub use chat::*;
// `self::` keeps this from clashing with the built-in core crate
pub use self::core::*;
pub use expenses::*;
pub use export::*;
pub use reports::*;
pub use rules::*;
pub use serve::*;

/// Truncate a string to a maximum number of characters, adding "..." if
/// truncated
///
/// Counts characters, not bytes, so descriptions with accented or other
/// multibyte characters never split mid-character.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
