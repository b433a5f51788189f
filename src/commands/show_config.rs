//! Show-config command

use anyhow::Result;
use ryml_build::Config;

/// Print the resolved configuration
pub(crate) fn run(config: &Config) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
