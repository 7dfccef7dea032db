use crate::app::AppContext;
use crate::cli::ConfigCommand;
use crate::config::{write_config, PrivnoteConfig};
use crate::errors::CliError;

pub fn handle_config(ctx: &AppContext, command: &ConfigCommand) -> anyhow::Result<()> {
    let path = ctx.config_path()?;
    match command {
        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                return Err(CliError::invalid_input(format!(
                    "Config already exists at {}\nUse --force to overwrite it.",
                    path.display()
                ))
                .into());
            }
            write_config(&path, &PrivnoteConfig::default())?;
            if !ctx.quiet() {
                println!("Wrote config to {}", path.display());
            }
        }
        ConfigCommand::Show => {
            let config = ctx.config()?;
            if !ctx.quiet() {
                let source = if path.exists() {
                    path.display().to_string()
                } else {
                    "built-in defaults".to_string()
                };
                println!("# {}", source);
            }
            print!("{}", toml::to_string_pretty(config)?);
        }
    }
    Ok(())
}
