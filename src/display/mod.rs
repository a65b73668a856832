//! Display formatting for terminal output

pub mod transaction;

pub use transaction::{
    format_transaction_details, format_transaction_short, format_transaction_table,
};

/// Shorten a string to at most `max_chars` characters, ending in "..."
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}
