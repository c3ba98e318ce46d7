use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfStoreError;
use crate::paths::CONFIG_FILE_NAME;

pub const DEFAULT_WORKSPACE: &str = "master";

/// Environment tier the signed-in session targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Staging,
}

/// Persisted CLI configuration. Missing file or missing fields fall back to
/// defaults so a fresh install behaves like a logged-out client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conf {
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_workspace")]
    pub workspace: String,
    #[serde(default)]
    pub env: Environment,
}

fn default_workspace() -> String {
    DEFAULT_WORKSPACE.to_owned()
}

impl Default for Conf {
    fn default() -> Self {
        Self {
            account: None,
            login: None,
            token: None,
            workspace: default_workspace(),
            env: Environment::default(),
        }
    }
}

impl Conf {
    pub fn load(dir: &Path) -> Result<Self, ConfStoreError> {
        let path = dir.join(CONFIG_FILE_NAME);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default())
            }
            Err(source) => return Err(ConfStoreError::io("reading config file", &path, source)),
        };
        serde_json::from_str(&raw).map_err(|source| ConfStoreError::Json { path, source })
    }

    pub fn save(&self, dir: &Path) -> Result<(), ConfStoreError> {
        fs::create_dir_all(dir)
            .map_err(|source| ConfStoreError::io("creating config directory", dir, source))?;
        let path = dir.join(CONFIG_FILE_NAME);
        let raw = serde_json::to_string_pretty(self).map_err(|source| ConfStoreError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, raw)
            .map_err(|source| ConfStoreError::io("writing config file", &path, source))
    }

    /// Drop the signed-in identity while keeping account/workspace context.
    pub fn clear_session(&mut self) {
        self.token = None;
        self.login = None;
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{Conf, Environment, DEFAULT_WORKSPACE};
    use crate::error::ConfStoreError;
    use crate::paths::CONFIG_FILE_NAME;

    #[test]
    fn missing_file_loads_as_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let conf = Conf::load(dir.path()).expect("load should succeed");
        assert_eq!(conf, Conf::default());
        assert_eq!(conf.workspace, DEFAULT_WORKSPACE);
        assert!(!conf.is_logged_in());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("temp dir");
        let conf = Conf {
            account: Some("acme".to_owned()),
            login: Some("dev@example.com".to_owned()),
            token: Some("tok-1".to_owned()),
            workspace: "dev".to_owned(),
            env: Environment::Staging,
        };
        conf.save(dir.path()).expect("save should succeed");

        let loaded = Conf::load(dir.path()).expect("load should succeed");
        assert_eq!(loaded, conf);
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{"account":"acme"}"#,
        )
        .expect("write config");

        let conf = Conf::load(dir.path()).expect("load should succeed");
        assert_eq!(conf.account.as_deref(), Some("acme"));
        assert_eq!(conf.workspace, DEFAULT_WORKSPACE);
        assert_eq!(conf.env, Environment::Production);
    }

    #[test]
    fn corrupt_files_report_the_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{ nope").expect("write config");

        let error = Conf::load(dir.path()).expect_err("load must fail");
        match error {
            ConfStoreError::Json { path, .. } => {
                assert!(path.ends_with(CONFIG_FILE_NAME));
            }
            other => panic!("unexpected error kind: {other}"),
        }
    }

    #[test]
    fn clear_session_keeps_account_context() {
        let mut conf = Conf {
            account: Some("acme".to_owned()),
            login: Some("dev@example.com".to_owned()),
            token: Some("tok-1".to_owned()),
            workspace: "dev".to_owned(),
            env: Environment::Production,
        };
        conf.clear_session();
        assert!(!conf.is_logged_in());
        assert_eq!(conf.login, None);
        assert_eq!(conf.account.as_deref(), Some("acme"));
        assert_eq!(conf.workspace, "dev");
    }
}
