//! Profile export/import command implementations.

use std::path::Path;

use anyhow::{Context, Result};
use meshlint_core::GuardianSettings;

fn load_settings(config: Option<&Path>) -> Result<GuardianSettings> {
    match config {
        Some(path) => GuardianSettings::from_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display())),
        None => Ok(GuardianSettings::new()),
    }
}

/// Exports the active profile to a JSON file.
pub fn export(config: Option<&Path>, file: &Path) -> Result<()> {
    let mut settings = load_settings(config)?;
    settings
        .export_active_profile(file)
        .with_context(|| format!("failed to export profile to {}", file.display()))?;
    println!("exported active profile to {}", file.display());
    Ok(())
}

/// Validates a profile document and records it as the active profile.
///
/// With `check_only` the document is only validated. Otherwise, when a
/// settings file is in use, the reference is persisted into it.
pub fn import(config: Option<&Path>, file: &Path, check_only: bool) -> Result<()> {
    let mut settings = load_settings(config)?;
    let profile = settings
        .import_profile_from_file(file, !check_only)
        .with_context(|| format!("failed to import profile from {}", file.display()))?;

    println!(
        "profile '{}' (version {}) with {} rule(s) imported from {}",
        profile.name,
        profile.version,
        profile.rule_configs().len(),
        file.display()
    );

    if check_only {
        return Ok(());
    }

    if let Some(config_path) = config {
        settings
            .save_to_file(config_path)
            .with_context(|| format!("failed to persist settings to {}", config_path.display()))?;
        println!("active profile recorded in {}", config_path.display());
    } else {
        println!("no settings file given; pass --config to persist the active profile");
    }
    Ok(())
}
