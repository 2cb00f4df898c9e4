//! Show or initialize the configuration file.

use std::path::PathBuf;

use grouping_common::config::AppConfig;

pub fn run(config: &AppConfig, path: PathBuf, init: bool, force: bool) -> anyhow::Result<()> {
    if init {
        if path.exists() && !force {
            anyhow::bail!(
                "Config already exists at {} (use --force to overwrite)",
                path.display()
            );
        }
        let defaults = AppConfig::default();
        defaults
            .save_to(&path)
            .map_err(|e| anyhow::anyhow!("Failed to write config: {e}"))?;
        println!("Wrote default config to: {}", path.display());
        return Ok(());
    }

    let source = if path.exists() { "file" } else { "defaults" };
    println!("Config path: {} ({source})", path.display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
