//! Configuration module for bizledger
//!
//! - path resolution for the settings file and the default ledger file
//! - user settings persistence (currency, date format, category catalog)

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::Settings;
