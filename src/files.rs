use anyhow::{bail, Result};
use std::io::prelude::*;
use std::path::Path;
use std::fs;

fn read_to_string(path: &Path) -> Result<String> {
    match fs::OpenOptions::new().read(true).open(path) {
        Ok(mut f) => {
            let mut contents = String::new();
            if let Err(e) = f.read_to_string(&mut contents) {
                bail!(
                    "Unable to read file contents. (File: '{}')\nDetails: {}",
                    path.display(),
                    e
                );
            }

            Ok(contents)
        }
        Err(e) => bail!(
            "Failed to open file. (File: '{}')\nDetails: {}",
            path.display(),
            e
        ),
    }
}

pub fn read_toml<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let contents = read_to_string(path)?;

    match toml::from_str::<T>(&contents) {
        Ok(r) => Ok(r),
        Err(e) => bail!(
            "Unable to parse TOML. (File: '{}')\nDetails: {}",
            path.display(),
            e
        ),
    }
}

pub fn read_json<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let contents = read_to_string(path)?;

    match serde_json::from_str::<T>(&contents) {
        Ok(r) => Ok(r),
        Err(e) => bail!(
            "Unable to parse JSON. (File: '{}')\nDetails: {}",
            path.display(),
            e
        ),
    }
}

/* Serializes `data` as TOML into `path`, creating missing parent directories */
pub fn write_toml<T>(data: &T, path: &Path) -> Result<()>
where
    T: serde::ser::Serialize,
{
    let toml = match toml::to_string(data) {
        Ok(t) => t,
        Err(e) => bail!(
            "Unable to serialize TOML. (File: '{}')\nDetails: {}",
            path.display(),
            e
        ),
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    match fs::OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)
    {
        Ok(mut f) => {
            if let Err(e) = f.write_all(toml.as_bytes()) {
                bail!(
                    "Failed to write contents to file `{}`.\nDetails: {}",
                    path.display(),
                    e
                );
            }

            Ok(())
        }
        Err(e) => bail!(
            "Failed to open file. (File: '{}')\nDetails: {}",
            path.display(),
            e
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn toml_written_is_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/sample.toml");
        let sample = Sample {
            name: "movies".to_string(),
            count: 3,
        };

        write_toml(&sample, &path).unwrap();

        assert_eq!(read_toml::<Sample>(&path).unwrap(), sample);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = read_toml::<Sample>(&path).unwrap_err().to_string();

        assert!(err.contains("absent.toml"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(read_json::<Sample>(&path).is_err());
    }
}
