use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::server::InitError;

const CONFIG_PATH: &str = "config/config.toml";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GlobalConfig {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default)]
    pub database: Database,
    #[serde(default = "default_log_level")]
    pub log_level: usize,
}

fn default_address() -> String {
    "0.0.0.0:8081".to_string()
}

fn default_log_level() -> usize {
    2
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            database: Database::default(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Database {
    pub path: String,
    pub salt: String,
    pub migrate: bool,
}

impl Default for Database {
    fn default() -> Self {
        Self {
            path: "database/backend.sqlite".to_owned(),
            salt: "be sure to change it".to_owned(),
            migrate: true,
        }
    }
}

/// read config from `path`
///
/// Return `Ok(None)` if the file doesn't exist
pub async fn load(path: impl AsRef<Path>) -> Result<Option<GlobalConfig>, InitError> {
    let path = path.as_ref();
    if fs::metadata(path).await.is_err() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .await
        .map_err(InitError::ConfigRead)?;
    toml::from_str(&raw).map(Some).map_err(InitError::ConfigParse)
}

/// write default config to `path`, creating parent directory as needed
pub async fn generate(path: impl AsRef<Path>) -> Result<GlobalConfig, InitError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(InitError::ConfigDir)?;
    }
    let config = GlobalConfig::default();
    let config_txt = toml::to_string(&config).map_err(InitError::ConfigSerialize)?;
    fs::write(path, config_txt)
        .await
        .map_err(InitError::ConfigWrite)?;
    Ok(config)
}

/// load config from `config/config.toml`
///
/// A default config is generated and the process exits if the file is missing,
/// so the operator gets a chance to review it(especially the salt).
pub async fn init() -> GlobalConfig {
    match load(CONFIG_PATH).await {
        Ok(Some(config)) => config,
        Ok(None) => {
            println!("Unable to find {}, generating default config", CONFIG_PATH);
            if let Err(err) = generate(CONFIG_PATH).await {
                eprintln!("{}", err);
                std::process::exit(1);
            }
            println!(
                "Config generated, please edit {} before restart",
                CONFIG_PATH
            );
            println!("Finished, exiting...");
            std::process::exit(0);
        }
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_config() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config.address, "0.0.0.0:8081");
        assert_eq!(config.log_level, 2);
        assert!(config.database.migrate);
    }
    #[test]
    fn partial_database() {
        let config: GlobalConfig = toml::from_str(
            r#"
            log_level = 0
            [database]
            path = "tutor.sqlite"
            "#,
        )
        .unwrap();
        assert_eq!(config.log_level, 0);
        assert_eq!(config.database.path, "tutor.sqlite");
        assert_eq!(config.database.salt, "be sure to change it");
    }
    #[tokio::test]
    async fn missing_file() {
        let config = load("config/this-file-does-not-exist.toml").await.unwrap();
        assert!(config.is_none());
    }
}
