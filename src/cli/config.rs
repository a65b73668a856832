//! CLI commands for configuration and initialization

use tracing::info;

use super::LedgerContext;
use crate::error::LedgerResult;
use crate::ledger::{Ledger, LedgerDocument};
use crate::source::{write_json_atomic, LedgerSource};

/// Show paths, the active data source and settings
pub fn handle_config_command(ctx: &LedgerContext) -> LedgerResult<()> {
    let settings = &ctx.settings;

    println!("bizledger Configuration");
    println!("=======================");
    println!("Config directory: {}", ctx.paths.base_dir().display());
    println!("Settings file:    {}", ctx.paths.settings_file().display());
    println!(
        "Initialized:      {}",
        if ctx.paths.is_initialized() { "yes" } else { "no" }
    );
    println!("Data source:      {}", ctx.source().describe());
    println!();
    println!("Settings:");
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!("  Date format:     {}", settings.date_format);
    println!("  Recent count:    {}", settings.recent_count);
    println!(
        "  Categories:      {}{}",
        settings.categories.labels.join(", "),
        if settings.categories.closed { " (closed)" } else { "" }
    );
    println!("  Payment methods: {}", settings.payment_methods.join(", "));

    Ok(())
}

/// Write default settings and an empty ledger file
///
/// An existing settings file or ledger file is left untouched.
pub fn handle_init_command(ctx: &LedgerContext) -> LedgerResult<()> {
    if ctx.paths.is_initialized() {
        println!(
            "bizledger is already initialized at: {}",
            ctx.paths.base_dir().display()
        );
        return Ok(());
    }

    let mut settings = ctx.settings.clone();
    let ledger_file = settings
        .data_file
        .clone()
        .unwrap_or_else(|| ctx.paths.ledger_file());

    if !ledger_file.exists() {
        write_json_atomic(&ledger_file, &LedgerDocument::from(&Ledger::new()))?;
        info!(path = %ledger_file.display(), "created ledger file");
    }

    settings.data_file = Some(ledger_file.clone());
    settings.save(&ctx.paths)?;

    println!("Initialized bizledger at: {}", ctx.paths.base_dir().display());
    println!("Settings:    {}", ctx.paths.settings_file().display());
    println!("Ledger file: {}", ledger_file.display());
    println!();
    println!("Run 'bizledger add --save ...' to record your first transaction.");

    Ok(())
}
