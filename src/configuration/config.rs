#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::collections::HashMap;
use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::Location;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ApiBaseUrl,
    ConfigFile,
    Location,
    Username,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        if key == ConfigKey::Username {
            let mut user = env::var("USER").unwrap_or_else(|_| return "".to_string());
            if user.is_empty() {
                user = "User".to_string();
            }

            return user;
        }

        #[cfg(not(target_os = "macos"))]
        let config_path = dirs::cache_dir()
            .unwrap_or_else(env::temp_dir)
            .join("chatwindow/config.toml");
        #[cfg(target_os = "macos")]
        let config_path = dirs::home_dir()
            .unwrap_or_else(env::temp_dir)
            .join(".config/chatwindow/config.toml");

        let res = match key {
            ConfigKey::ApiBaseUrl => "http://localhost:8080".to_string(),
            ConfigKey::Location => "http://localhost:3000/".to_string(),

            // Special
            ConfigKey::ConfigFile => config_path.to_string_lossy().to_string(),
            ConfigKey::Username => "".to_string(),
        };

        return res;
    }

    /// Resolves every key from defaults, then the config file, then CLI flags
    /// and their environment variables. Nothing is written to the global store.
    pub async fn resolve(clap_arg_matches: &[&ArgMatches]) -> Result<HashMap<ConfigKey, String>> {
        let mut resolved = ConfigKey::iter()
            .map(|key| return (key, Config::default(key)))
            .collect::<HashMap<ConfigKey, String>>();

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(&config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(&config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if key == ConfigKey::ConfigFile {
                    continue;
                }

                if let Some(val) = doc.get(&key.to_string()) {
                    if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        resolved.insert(key, val_str.to_string());
                    } else {
                        bail!(format!(
                            "{config_file} has an invalid value for key '{key}', expected a string"
                        ));
                    }
                }
            }
        }
        resolved.insert(ConfigKey::ConfigFile, config_file);

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    resolved.insert(key, val.to_string());
                }
            }
        }

        let location = resolved
            .get(&ConfigKey::Location)
            .map(|e| return e.to_string())
            .unwrap_or_default();
        if let Err(err) = Location::parse(&location) {
            bail!(format!("Location '{location}' is not a valid URL: {err}"));
        }

        return Ok(resolved);
    }

    pub async fn load(clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        let resolved = Config::resolve(&clap_arg_matches).await?;
        for (key, val) in resolved.iter() {
            Config::set(*key, val);
        }

        tracing::debug!(
            api_base_url = Config::get(ConfigKey::ApiBaseUrl),
            location = Config::get(ConfigKey::Location),
            username = Config::get(ConfigKey::Username),
            config_file = Config::get(ConfigKey::ConfigFile),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default() -> String {
        return ConfigKey::iter()
            .filter_map(|key| {
                let description = match key {
                    ConfigKey::ApiBaseUrl => "Base URL of the chat API. Questions are posted to {url}/api/chat.",
                    ConfigKey::Location => "Shareable location whose `llm` query parameter selects the model at startup.",
                    ConfigKey::Username => "Your user name displayed in your chat bubbles.",
                    ConfigKey::ConfigFile => return None,
                };

                let mut val = Config::default(key);
                if key == ConfigKey::Username {
                    val = "".to_string();
                }

                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");
    }
}
