use anyhow::{Result, bail};
use std::path::PathBuf;

pub fn get_home() -> Result<PathBuf> {
    if let Some(dir) = home::home_dir() {
        return Ok(dir);
    }

    bail!("Unable to locate user home directory");
}

pub fn config_dir() -> Result<PathBuf> {
    Ok(get_home()?.join(".config/drive-copy"))
}
