/* Setup program to be ready to start */

use crate::{
    auth,
    config::{self, Config, Destination, Loaded, SearchConfig},
    files, readline,
};
use anyhow::{bail, Result};
use std::path::PathBuf;
mod clap;

pub use self::clap::*;

pub fn run(config_path: Option<&str>, authorize: bool) -> Result<()> {
    let path = match config_path {
        Some(p) => PathBuf::from(p),
        None => config::default_path()?,
    };

    if path.exists() && !readline::prompt_yes(&format!("Overwrite existing configuration {:?}?", path))? {
        println!("Keeping the existing configuration.");
        return Ok(());
    }

    let config = ask_configuration()?;
    config::validate(&config)?;

    println!("\nSaving configuration to {:?}", path);
    files::write_toml::<Config>(&config, &path)?;

    if authorize {
        auth::reauthorize(&Loaded { config, path })?;
    }

    Ok(())
}

/* Gathers configurations from user */
fn ask_configuration() -> Result<Config> {
    let client_secrets = readline::prompt_default(
        "Path of the Google OAuth client secrets file (relative to the config directory)",
        "client_secrets.json",
    )?;
    let token_cache = readline::prompt_default("Where to keep the authorization session", "session.toml")?;

    let excluded = readline::prompt("Drive ids to leave out of search results (comma separated)")?;
    let exclude_drive_ids = split_list(excluded.as_deref().unwrap_or(""));

    let mut destinations = vec![];
    println!("\nAdd destination folders. Leave the name empty to finish.");
    while let Some(name) = readline::prompt("Destination name")? {
        let id = match readline::prompt("Destination folder id")? {
            Some(id) => id,
            None => bail!("Destination '{}' needs a folder id", name),
        };
        destinations.push(Destination { name, id });
    }

    Ok(Config {
        client_secrets,
        token_cache,
        exclude_drive_ids,
        search: SearchConfig::default(),
        destinations,
    })
}

pub fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
