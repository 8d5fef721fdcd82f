//! Load configuration from environment variables.

use anyhow::Result;

fn main() -> Result<()> {
    let config = visionboard::Config::from_env()?;
    println!(
        "bind_addr={}, port={}, allowed_origin={}",
        config.bind_addr, config.port, config.allowed_origin
    );
    Ok(())
}
