use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "foghorn",
    version,
    about = "Command-line client for the Foghorn platform"
)]
pub struct Cli {
    /// Print internal diagnostics at debug level.
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in to the platform and store the session token.
    Login {
        /// Account to sign in to; defaults to the previously used account.
        #[arg(short, long)]
        account: Option<String>,
        /// Workspace to sign in against; defaults to the active workspace.
        #[arg(short, long)]
        workspace: Option<String>,
    },

    /// Stream the workspace log channel to the terminal.
    Logs {
        /// Severity filter applied server-side.
        #[arg(short, long, default_value = "info")]
        level: String,
        /// App subject prefix to follow (e.g. `vendor.app`); router
        /// messages are always shown.
        #[arg(long, default_value = "")]
        app: String,
    },

    /// Stream the event channel for a sender and key.
    Events {
        sender: String,
        key: String,
        /// App subject prefix to follow; router messages are always shown.
        #[arg(long, default_value = "")]
        app: String,
    },

    /// Print the stored login, account and workspace.
    Whoami,

    /// Manage the active workspace.
    Workspace {
        #[command(subcommand)]
        command: WorkspaceCommand,
    },

    /// Discard the stored session token.
    Logout,
}

#[derive(Debug, Subcommand)]
pub enum WorkspaceCommand {
    /// Switch the active workspace.
    Use { name: String },
}
