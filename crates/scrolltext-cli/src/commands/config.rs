use anyhow::Result;

use scrolltext_core::AppConfig;

/// Print the effective configuration
pub fn run(config: AppConfig) -> Result<()> {
    // Validate the merged flags the same way the view would
    let scroll = config.scroll.clone().validated()?;
    let effective = AppConfig { scroll, ..config };
    print!("{}", effective.to_toml()?);
    Ok(())
}
