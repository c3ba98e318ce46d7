use anyhow::Result;
use conf_store::Conf;

pub fn run(conf: &Conf) -> Result<()> {
    match (&conf.login, &conf.account) {
        (Some(login), Some(account)) => {
            println!(
                "Logged into {account} as {login} at workspace {}",
                conf.workspace
            );
        }
        _ => println!("Not logged in."),
    }
    Ok(())
}
