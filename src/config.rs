use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory name for project-specific configuration.
pub const CONFIG_DIR: &str = ".kbot";
/// Filename for the configuration within the config directory.
pub const CONFIG_FILENAME: &str = "config.json";

/// Configuration keys enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    JiraUrl,
    JiraUser,
    JiraPassword,
    ZendeskDomain,
    ZendeskUsername,
    ZendeskToken,
    ZendeskView,
    ReleaseIssues,
    ReleaseMessage,
}

impl ConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::JiraUrl => "jira.url",
            ConfigKey::JiraUser => "jira.user",
            ConfigKey::JiraPassword => "jira.password",
            ConfigKey::ZendeskDomain => "zendesk.domain",
            ConfigKey::ZendeskUsername => "zendesk.username",
            ConfigKey::ZendeskToken => "zendesk.token",
            ConfigKey::ZendeskView => "zendesk.view",
            ConfigKey::ReleaseIssues => "release.jira.issues",
            ConfigKey::ReleaseMessage => "release.message",
        }
    }

    /// Get all config keys
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::JiraUrl,
            ConfigKey::JiraUser,
            ConfigKey::JiraPassword,
            ConfigKey::ZendeskDomain,
            ConfigKey::ZendeskUsername,
            ConfigKey::ZendeskToken,
            ConfigKey::ZendeskView,
            ConfigKey::ReleaseIssues,
            ConfigKey::ReleaseMessage,
        ]
    }
}

/// Fatal configuration problems. Any of these aborts startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config must be a JSON object")]
    NotAnObject,
    #[error("config key '{0}' must be a string")]
    NotAString(&'static str),
    #[error("missing config key '{0}'")]
    Missing(&'static str),
}

/// Parses a JSON configuration file content into a map of recognized
/// configuration values.
///
/// Expects `content` to be a JSON object whose values are strings
/// (e.g. {"jira.url": "https://...", ...}). Unknown keys are skipped.
pub fn parse_config(content: &[u8]) -> Result<HashMap<ConfigKey, String>, ConfigError> {
    let value: Value = serde_json::from_slice(content)?;

    let Value::Object(map) = &value else {
        return Err(ConfigError::NotAnObject);
    };

    let mut config_map = HashMap::new();
    for key in ConfigKey::all() {
        if let Some(val) = map.get(key.as_str()) {
            match val.as_str() {
                Some(s) => {
                    config_map.insert(*key, s.to_string());
                }
                None => return Err(ConfigError::NotAString(key.as_str())),
            }
        }
    }

    Ok(config_map)
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub jira_url: String,
    pub jira_user: String,
    pub jira_password: String,
    pub zendesk_domain: String,
    pub zendesk_username: String,
    pub zendesk_token: String,
    pub view_id: String,
    pub issue_keys: Vec<String>,
    pub release_message: String,
}

impl Config {
    /// Builds a validated configuration from parsed key/value pairs.
    /// A key that is absent or blank is a fatal error.
    pub fn from_map(mut map: HashMap<ConfigKey, String>) -> Result<Self, ConfigError> {
        let mut take = |key: ConfigKey| {
            map.remove(&key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key.as_str()))
        };

        Ok(Config {
            jira_url: take(ConfigKey::JiraUrl)?,
            jira_user: take(ConfigKey::JiraUser)?,
            jira_password: take(ConfigKey::JiraPassword)?,
            zendesk_domain: take(ConfigKey::ZendeskDomain)?,
            zendesk_username: take(ConfigKey::ZendeskUsername)?,
            zendesk_token: take(ConfigKey::ZendeskToken)?,
            view_id: take(ConfigKey::ZendeskView)?,
            issue_keys: take(ConfigKey::ReleaseIssues)?
                .split_whitespace()
                .map(str::to_string)
                .collect(),
            release_message: take(ConfigKey::ReleaseMessage)?,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Config::from_map(parse_config(&content)?)
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from(CONFIG_DIR).join(CONFIG_FILENAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config_json() -> String {
        r#"{
            "jira.url": "https://jira.example.com",
            "jira.user": "bot",
            "jira.password": "secret",
            "zendesk.domain": "example",
            "zendesk.username": "bot@example.com",
            "zendesk.token": "zdtoken",
            "zendesk.view": "360000123456",
            "release.jira.issues": "PROJ-1 PROJ-2  PROJ-3",
            "release.message": "Released in 2.5.1"
        }"#
        .to_string()
    }

    #[test]
    fn object_with_keys_works() {
        let config = parse_config(full_config_json().as_bytes()).unwrap();
        assert_eq!(
            config.get(&ConfigKey::JiraUrl).unwrap(),
            "https://jira.example.com"
        );
        assert_eq!(config.get(&ConfigKey::ZendeskView).unwrap(), "360000123456");
        assert_eq!(config.len(), ConfigKey::all().len());
    }

    #[test]
    fn unknown_key_skipped() {
        let json = r#"{"unknown": "value", "jira.url": "https://jira.example.com"}"#.as_bytes();
        let config = parse_config(json).unwrap();
        assert_eq!(config.len(), 1);
        assert!(config.contains_key(&ConfigKey::JiraUrl));
    }

    #[test]
    fn invalid_json_fails() {
        let json = r#"{"jira.url""#.as_bytes();
        assert!(parse_config(json).is_err());
    }

    #[test]
    fn array_input_fails() {
        let json = r#"["jira.url"]"#.as_bytes();
        assert!(matches!(parse_config(json), Err(ConfigError::NotAnObject)));
    }

    #[test]
    fn non_string_value_fails() {
        let json = r#"{"zendesk.view": 360000123456}"#.as_bytes();
        assert!(matches!(
            parse_config(json),
            Err(ConfigError::NotAString("zendesk.view"))
        ));
    }

    #[test]
    fn from_map_builds_full_config() {
        let map = parse_config(full_config_json().as_bytes()).unwrap();
        let config = Config::from_map(map).unwrap();
        assert_eq!(config.jira_user, "bot");
        assert_eq!(config.zendesk_domain, "example");
        assert_eq!(config.issue_keys, vec!["PROJ-1", "PROJ-2", "PROJ-3"]);
        assert_eq!(config.release_message, "Released in 2.5.1");
    }

    #[test]
    fn from_map_missing_key_fails() {
        let mut map = parse_config(full_config_json().as_bytes()).unwrap();
        map.remove(&ConfigKey::ZendeskToken);
        assert!(matches!(
            Config::from_map(map),
            Err(ConfigError::Missing("zendesk.token"))
        ));
    }

    #[test]
    fn from_map_blank_value_fails() {
        let mut map = parse_config(full_config_json().as_bytes()).unwrap();
        map.insert(ConfigKey::ReleaseMessage, "   ".to_string());
        assert!(matches!(
            Config::from_map(map),
            Err(ConfigError::Missing("release.message"))
        ));
    }

    #[test]
    fn issue_keys_split_on_whitespace() {
        let mut map = parse_config(full_config_json().as_bytes()).unwrap();
        map.insert(ConfigKey::ReleaseIssues, " PROJ-9\tPROJ-10\nPROJ-11 ".to_string());
        let config = Config::from_map(map).unwrap();
        assert_eq!(config.issue_keys, vec!["PROJ-9", "PROJ-10", "PROJ-11"]);
    }
}
