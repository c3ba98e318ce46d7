mod login;
mod logs;
mod whoami;
mod workspace;

use std::path::Path;

use anyhow::{bail, Result};
use conf_store::{config_dir, Conf};
use courier::{Courier, Credentials, Endpoints};

use crate::cli::{Cli, Command};

/// Client identifier sent as the user-agent and used as the default local
/// identity in the dedup sink.
pub const CLIENT_ID: &str = concat!("foghorn/", env!("CARGO_PKG_VERSION"));

pub async fn dispatch(cli: Cli) -> Result<()> {
    let dir = config_dir()?;
    let conf = Conf::load(&dir)?;
    tracing::debug!(config = %dir.display(), logged_in = conf.is_logged_in(), "configuration loaded");

    match cli.command {
        Command::Login { account, workspace } => login::run(&dir, conf, account, workspace).await,
        Command::Logs { level, app } => {
            require_token(&conf)?;
            logs::run(&conf, &level, &app).await
        }
        Command::Events { sender, key, app } => {
            require_token(&conf)?;
            logs::run_events(&conf, &sender, &key, &app).await
        }
        Command::Whoami => whoami::run(&conf),
        Command::Workspace { command } => workspace::run(&dir, conf, command),
        Command::Logout => logout(&dir, conf),
    }
}

pub(crate) fn courier() -> Result<Courier> {
    Ok(Courier::new(Endpoints::from_env(), CLIENT_ID)?)
}

fn require_token(conf: &Conf) -> Result<()> {
    if !conf.is_logged_in() {
        bail!("not logged in; run `foghorn login` first");
    }
    Ok(())
}

fn logout(dir: &Path, mut conf: Conf) -> Result<()> {
    conf.clear_session();
    conf.save(dir)?;
    println!("Logged out.");
    Ok(())
}

/// Read-only credential view over the loaded config, taken fresh per
/// subscription.
pub(crate) struct ConfCredentials<'a>(pub &'a Conf);

impl Credentials for ConfCredentials<'_> {
    fn token(&self) -> Option<String> {
        self.0.token.clone()
    }

    fn account(&self) -> String {
        self.0.account.clone().unwrap_or_default()
    }

    fn workspace(&self) -> String {
        self.0.workspace.clone()
    }
}
