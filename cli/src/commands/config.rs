//! Config commands

use crate::config::Config;
use crate::output::OutputFormat;
use crate::ConfigCommands;
use anyhow::{anyhow, bail, Result};
use clap::ValueEnum;

const KEYS: [&str; 4] = ["format", "log_filter", "store.strict_ordering", "store.id_length"];

pub fn handle(action: ConfigCommands, profile: Option<&str>) -> Result<()> {
    match action {
        ConfigCommands::Init => {
            let path = Config::default().save(profile)?;
            println!("Configuration initialized at {}", path.display());
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load(profile)?;
            set(&mut config, &key, &value)?;
            config.store.validate()?;
            config.save(profile)?;
            println!("Set {} successfully", key);
        }
        ConfigCommands::Get { key } => {
            let config = Config::load(profile)?;
            println!("{}: {}", key, get(&config, &key)?);
        }
        ConfigCommands::List => {
            let config = Config::load(profile)?;
            for key in KEYS {
                println!("{}: {}", key, get(&config, key)?);
            }
        }
    }
    Ok(())
}

fn set(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "format" => {
            let format = OutputFormat::from_str(value, true).map_err(|e| anyhow!(e))?;
            config.format = Some(format);
        }
        "log_filter" => config.log_filter = Some(value.to_string()),
        "store.strict_ordering" => config.store.strict_ordering = value.parse()?,
        "store.id_length" => config.store.id_length = value.parse()?,
        _ => bail!("Unknown config key: {}", key),
    }
    Ok(())
}

fn get(config: &Config, key: &str) -> Result<String> {
    let not_set = || "(not set)".to_string();
    Ok(match key {
        "format" => config
            .format
            .map(|f| format!("{:?}", f).to_lowercase())
            .unwrap_or_else(not_set),
        "log_filter" => config.log_filter.clone().unwrap_or_else(not_set),
        "store.strict_ordering" => config.store.strict_ordering.to_string(),
        "store.id_length" => config.store.id_length.to_string(),
        _ => bail!("Unknown config key: {}", key),
    })
}
