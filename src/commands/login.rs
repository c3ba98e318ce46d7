use std::path::Path;

use anyhow::{anyhow, Context, Result};
use conf_store::{Conf, Environment};
use courier::{login_from_token, Tier};
use uuid::Uuid;

pub async fn run(
    dir: &Path,
    mut conf: Conf,
    account: Option<String>,
    workspace: Option<String>,
) -> Result<()> {
    let account = account
        .or_else(|| conf.account.clone())
        .ok_or_else(|| anyhow!("no account on record; pass --account on first login"))?;
    let workspace = workspace.unwrap_or_else(|| conf.workspace.clone());

    // One-time value scoping the handshake stream; the server echoes the
    // token only on the stream opened with this exact state.
    let state = Uuid::new_v4().simple().to_string();

    let courier = super::courier()?;
    let public = courier.endpoints().public_endpoint().to_owned();

    let return_url = format!("/_foghorn/auth/v1/callback?workspace={workspace}&state={state}");
    let return_url_encoded: String =
        url::form_urlencoded::byte_serialize(return_url.as_bytes()).collect();
    println!("Open this URL in your browser to sign in:\n");
    println!(
        "  https://{account}.{public}/_foghorn/auth/v1/login/?workspace={workspace}&ReturnUrl={return_url_encoded}\n"
    );
    println!("Waiting for the browser login to complete...");

    let token = courier
        .authenticate(&account, &workspace, &state)
        .await
        .context("login handshake failed")?;
    let login = login_from_token(&token)
        .ok_or_else(|| anyhow!("could not read the login claim from the session token"))?;

    conf.account = Some(account.clone());
    conf.login = Some(login.clone());
    conf.token = Some(token);
    conf.workspace = workspace.clone();
    conf.env = match courier.endpoints().tier() {
        Tier::Beta => Environment::Staging,
        Tier::Stable => Environment::Production,
    };
    conf.save(dir)?;

    println!("Logged into {account} as {login} at workspace {workspace}");
    Ok(())
}
