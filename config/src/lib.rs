// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::Error;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    pub movies_path: PathBuf,
    pub users_path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            movies_path: "data/movies.csv".into(),
            users_path: "data/users.csv".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct BrowseConfig {
    pub movies_per_page: usize,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self { movies_per_page: 10 }
    }
}

#[derive(Debug, Copy, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Memory,
    Sqlite,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: Backend,
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Memory,
            url: ":memory:".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub browse: BrowseConfig,
    pub database: DatabaseConfig,
    pub log: LogConfig,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        contents.parse()
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed: Self = toml::from_str(s)?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Error;

    #[test]
    fn load_example_config() -> Result<(), Error> {
        let expected = Config {
            catalog: CatalogConfig {
                movies_path: "data/movies.csv".into(),
                users_path: "data/users.csv".into(),
            },
            browse: BrowseConfig {
                movies_per_page: 10,
            },
            database: DatabaseConfig {
                backend: Backend::Sqlite,
                url: "cineflix.db".into(),
            },
            log: LogConfig {
                level: "debug".into(),
            },
        };

        let loaded = Config::load("example.toml")?;
        assert_eq!(expected, loaded);

        Ok(())
    }

    #[test]
    fn load_shipped_config() -> Result<(), Error> {
        let loaded = Config::load("../cineflix.toml")?;

        assert_eq!(loaded.database.backend, Backend::Memory);
        assert_eq!(loaded.catalog, CatalogConfig::default());
        assert!(loaded.browse.movies_per_page > 0);

        Ok(())
    }

    #[test]
    fn missing_sections_use_defaults() -> Result<(), Error> {
        let parsed: Config = "[browse]\nmovies_per_page = 20\n".parse()?;

        assert_eq!(parsed.browse.movies_per_page, 20);
        assert_eq!(parsed.database, DatabaseConfig::default());
        assert_eq!(parsed.catalog, CatalogConfig::default());
        assert_eq!(parsed.log.level, "info");

        Ok(())
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let parsed = "[database]\nbackend = \"mongo\"\n".parse::<Config>();
        assert!(parsed.is_err());
    }
}
