use std::path::Path;

use anyhow::Result;
use conf_store::Conf;

use crate::cli::WorkspaceCommand;

pub fn run(dir: &Path, mut conf: Conf, command: WorkspaceCommand) -> Result<()> {
    match command {
        WorkspaceCommand::Use { name } => {
            conf.workspace = name.clone();
            conf.save(dir)?;
            println!("You're now using the workspace {name}");
            Ok(())
        }
    }
}
