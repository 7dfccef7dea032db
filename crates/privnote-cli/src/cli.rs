use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use privnote_core::VERSION;

/// Privnote - self-destructing notes, encrypted before they leave your machine
#[derive(Parser)]
#[command(name = "privnote")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file
    #[arg(long, global = true, env = "PRIVNOTE_CONFIG")]
    pub config: Option<String>,

    /// Service origin (overrides the config file)
    #[arg(long, global = true, env = "PRIVNOTE_ORIGIN")]
    pub origin: Option<String>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt and send a note, printing its link
    Send(SendArgs),

    /// Read (and thereby destroy) a note
    Read(ReadArgs),

    /// Inspect a link without contacting the service
    Link(LinkArgs),

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

/// Arguments for the `send` command
#[derive(Args)]
pub struct SendArgs {
    /// Note text (read from stdin when omitted)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Manual password; kept out of the link and shared separately
    #[arg(short, long)]
    pub password: Option<String>,

    /// Hours before the note self-destructs unread (0-720, 0 = after reading)
    #[arg(short, long, value_name = "HOURS")]
    pub duration: Option<u32>,

    /// Do not ask the reader for confirmation before showing the note
    #[arg(long)]
    pub no_confirm: bool,

    /// Email to notify when the note is destroyed
    #[arg(long, value_name = "EMAIL")]
    pub notify_email: Option<String>,

    /// Reference name included in the notification email
    #[arg(long, value_name = "NAME")]
    pub notify_ref: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `read` command
#[derive(Args)]
pub struct ReadArgs {
    /// Note link (https://privnote.com/<id>[#<password>])
    #[arg(value_name = "LINK")]
    pub link: String,

    /// Password, for links that do not carry one
    #[arg(short, long)]
    pub password: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `link` command
#[derive(Args)]
pub struct LinkArgs {
    /// Note link to inspect
    #[arg(value_name = "LINK")]
    pub link: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}
