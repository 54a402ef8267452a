//! Config command - read and change settings

use crate::{
    DewitError,
    cli::ConfigCommands,
    config::{DewitConfig, KEYS},
};

type Result<T> = std::result::Result<T, DewitError>;

/// Execute a config subcommand
pub fn execute(mut config: DewitConfig, command: &ConfigCommands, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            for key in KEYS {
                println!("{key} = {}", config.get(key)?);
            }
        }
        ConfigCommands::Set { setting } => {
            let (key, value) = setting.split_once('=').ok_or_else(|| {
                DewitError::InvalidInput("Invalid format. Use: dewit config set key=value".into())
            })?;
            let (key, value) = (key.trim(), value.trim());

            config.set(key, value)?;
            config.save()?;
            if !quiet {
                println!("Set {key} = {}", config.get(key)?);
            }
        }
        ConfigCommands::Get { key } => {
            println!("{}", config.get(key)?);
        }
    }
    Ok(())
}
