//! Config command handlers.

use anyhow::{Context, Result};
use planit_core::config::{self, Config};
use planit_core::posture::Posture;

pub fn path() {
    println!("{}", config::paths::config_path().display());
}

pub fn init() -> Result<()> {
    let config_path = config::paths::config_path();
    Config::init(&config_path)
        .with_context(|| format!("init config at {}", config_path.display()))?;
    println!("Created config at {}", config_path.display());
    Ok(())
}

pub fn set_api_url(url: &str) -> Result<()> {
    let url = url.trim().trim_end_matches('/');
    Config::save_api_url(url)?;
    println!("✓ API URL set to {url}");
    Ok(())
}

pub fn set_posture(value: &str) -> Result<()> {
    let posture: Posture = value.parse()?;
    Config::save_posture(posture)?;
    println!("✓ Posture set to {posture}");
    Ok(())
}
