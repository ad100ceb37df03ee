use serde::{Deserialize, Serialize};

use std::{
    env, fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_path: PathBuf::from("./database.db"),
        }
    }
}

fn parse(contents: &str) -> Result<Config, Box<dyn std::error::Error>> {
    // An empty document deserializes to unit, not to a map
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }

    serde_yaml::from_str(contents).map_err(Into::into)
}

fn load_from_file() -> Result<Config, Box<dyn std::error::Error>> {
    // Retrieve env variable
    let config_path = env::var("NOTES_API_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    // Try env path
    if Path::new(&config_path).exists() {
        tracing::info!("Loading config from '{}'", config_path);
        return parse(&fs::read_to_string(&config_path)?);
    }

    // Fallback to config.yaml
    if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        return parse(&fs::read_to_string("config.yaml")?);
    }

    tracing::info!("No config file found, using built-in defaults");
    Ok(Config::default())
}

fn apply_env(
    mut config: Config,
    var: impl Fn(&str) -> Option<String>,
) -> Result<Config, Box<dyn std::error::Error>> {
    if let Some(host) = var("NOTES_API_HOST") {
        config.host = host;
    }

    if let Some(port) = var("NOTES_API_PORT") {
        config.port = port
            .parse::<u16>()
            .map_err(|e| format!("Failed to parse NOTES_API_PORT: {e}"))?;
    }

    if let Some(path) = var("NOTES_API_DATABASE_PATH") {
        config.database_path = PathBuf::from(path);
    }

    Ok(config)
}

/// Config file first, then environment overrides on top.
pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    let config = load_from_file()?;

    apply_env(config, |name| env::var(name).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_match_fixed_port_and_path() {
        let config = Config::default();

        assert_eq!(config.port, 3000);
        assert_eq!(config.database_path, PathBuf::from("./database.db"));
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = parse("port: 8080\n").unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.database_path, PathBuf::from("./database.db"));
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(parse("").unwrap(), Config::default());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(parse("port: not-a-number\n").is_err());
    }

    #[test]
    fn env_overrides_file_values() {
        let config = apply_env(
            parse("port: 8080\ndatabase_path: /tmp/a.db\n").unwrap(),
            vars(&[
                ("NOTES_API_PORT", "9000"),
                ("NOTES_API_DATABASE_PATH", "/tmp/b.db"),
            ]),
        )
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.database_path, PathBuf::from("/tmp/b.db"));
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn bad_port_override_is_an_error() {
        assert!(apply_env(Config::default(), vars(&[("NOTES_API_PORT", "http")])).is_err());
    }
}
