//! Persisted credential and configuration storage for the CLI.
//!
//! One JSON object per user, holding the signed-in identity, session token,
//! active account/workspace, and environment tier. The stream subsystem only
//! ever reads these values; commands that change them write the whole file
//! back.

mod error;
mod paths;
mod store;

pub use error::ConfStoreError;
pub use paths::{config_dir, CONFIG_FILE_NAME};
pub use store::{Conf, Environment, DEFAULT_WORKSPACE};
