//! Privnote CLI - self-destructing notes, encrypted before they leave your machine
//!
//! This is the command-line interface for Privnote. It wraps the core note
//! lifecycle with argument parsing, prompts and exit codes.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod output;

use clap::Parser;
use privnote_core::NoteError;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{handle_completions, handle_config, handle_link, handle_read, handle_send};
use crate::errors::CliError;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        if let Some(cli_error) = e.downcast_ref::<CliError>() {
            cli_error.exit();
        }
        if let Some(note_error) = e.downcast_ref::<NoteError>() {
            tracing::debug!(error = ?note_error, "command failed");
            CliError::from(note_error).exit();
        }
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Send(args) => handle_send(ctx, args),
        Commands::Read(args) => handle_read(ctx, args),
        Commands::Link(args) => handle_link(ctx, args),
        Commands::Config { command } => handle_config(ctx, command),
        Commands::Completions { shell } => handle_completions(*shell),
    }
}
