use std::env;
use std::path::PathBuf;

use crate::error::ConfStoreError;

pub const CONFIG_FILE_NAME: &str = "config.json";

const CONFIG_DIR_OVERRIDE: &str = "FOGHORN_CONFIG_DIR";

/// Directory holding the persisted CLI configuration:
/// `$FOGHORN_CONFIG_DIR` when set, else `~/.config/foghorn`.
pub fn config_dir() -> Result<PathBuf, ConfStoreError> {
    if let Ok(dir) = env::var(CONFIG_DIR_OVERRIDE) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = env::var("HOME").map_err(|_| ConfStoreError::MissingHome)?;
    Ok(PathBuf::from(home).join(".config").join("foghorn"))
}
