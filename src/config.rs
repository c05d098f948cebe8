use crate::{files, titles, user};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Destination {
    pub name: String,
    pub id: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct SearchConfig {
    #[serde(default = "default_max_imdb_results")]
    pub max_imdb_results: usize,
    #[serde(default)]
    pub skip_episode_folders: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_imdb_results: default_max_imdb_results(),
            skip_episode_folders: false,
        }
    }
}

fn default_max_imdb_results() -> usize {
    titles::DEFAULT_MAX_RESULTS
}

fn default_token_cache() -> String {
    "session.toml".to_string()
}

/* Field order matters: TOML wants plain values before tables */
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    pub client_secrets: String,
    #[serde(default = "default_token_cache")]
    pub token_cache: String,
    #[serde(default)]
    pub exclude_drive_ids: Vec<String>,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub destinations: Vec<Destination>,
}

/* Where the config file is and the directory its relative paths start from */
#[derive(Clone, Debug)]
pub struct Loaded {
    pub config: Config,
    pub path: PathBuf,
}

impl Loaded {
    pub fn base_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(p) => p.to_path_buf(),
            None => PathBuf::from("."),
        }
    }

    pub fn client_secrets_path(&self) -> PathBuf {
        resolve(&self.base_dir(), &self.config.client_secrets)
    }

    pub fn token_cache_path(&self) -> PathBuf {
        resolve(&self.base_dir(), &self.config.token_cache)
    }
}

pub fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        return path.to_path_buf();
    }

    base.join(path)
}

pub fn default_path() -> Result<PathBuf> {
    Ok(user::config_dir()?.join("config.toml"))
}

pub fn load(path: Option<&str>) -> Result<Loaded> {
    let path = match path {
        Some(p) => PathBuf::from(p),
        None => default_path()?,
    };

    if !path.exists() {
        bail!(
            "No config file in {:?}.\nTip: run `drive-copy setup` to create one.",
            path
        );
    }

    let config = files::read_toml::<Config>(&path)?;
    validate(&config)?;

    Ok(Loaded { config, path })
}

pub fn validate(config: &Config) -> Result<()> {
    if config.client_secrets.trim().is_empty() {
        bail!("`client_secrets` must point to the Google OAuth client secrets file");
    }

    for d in &config.destinations {
        if d.name.trim().is_empty() || d.id.trim().is_empty() {
            bail!("Every destination needs a `name` and an `id` (got {:?})", d);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
client_secrets = "client_secrets.json"
token_cache = "/var/lib/drive-copy/session.toml"
exclude_drive_ids = ["exclude1", "exclude2"]

[search]
max_imdb_results = 3
skip_episode_folders = true

[[destinations]]
name = "Movies"
id = "0AFolderMovies"

[[destinations]]
name = "Shows"
id = "0AFolderShows"
"#;

    #[test]
    fn full_config_is_parsed_in_order() {
        let config: Config = toml::from_str(FULL).unwrap();

        assert_eq!(config.exclude_drive_ids, vec!["exclude1", "exclude2"]);
        assert_eq!(config.search.max_imdb_results, 3);
        assert!(config.search.skip_episode_folders);
        let names: Vec<&str> = config.destinations.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Movies", "Shows"]);
    }

    #[test]
    fn minimal_config_gets_defaults() {
        let config: Config = toml::from_str(r#"client_secrets = "secrets.json""#).unwrap();

        assert_eq!(config.token_cache, "session.toml");
        assert!(config.exclude_drive_ids.is_empty());
        assert!(config.destinations.is_empty());
        assert_eq!(config.search, SearchConfig::default());
        assert_eq!(config.search.max_imdb_results, 6);
    }

    #[test]
    fn relative_paths_start_at_config_dir() {
        let loaded = Loaded {
            config: toml::from_str(FULL).unwrap(),
            path: PathBuf::from("/home/me/.config/drive-copy/config.toml"),
        };

        assert_eq!(
            loaded.client_secrets_path(),
            PathBuf::from("/home/me/.config/drive-copy/client_secrets.json")
        );
        assert_eq!(
            loaded.token_cache_path(),
            PathBuf::from("/var/lib/drive-copy/session.toml")
        );
    }

    #[test]
    fn config_survives_a_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config: Config = toml::from_str(FULL).unwrap();

        files::write_toml(&config, &path).unwrap();
        let loaded = load(path.to_str()).unwrap();

        assert_eq!(loaded.config, config);
    }

    #[test]
    fn missing_config_suggests_setup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let err = load(path.to_str()).unwrap_err().to_string();

        assert!(err.contains("drive-copy setup"));
    }

    #[test]
    fn incomplete_destination_is_rejected() {
        let mut config: Config = toml::from_str(FULL).unwrap();
        config.destinations.push(Destination {
            name: "Broken".to_string(),
            id: " ".to_string(),
        });

        assert!(validate(&config).is_err());
    }
}
