use crate::cli::ConfigAction;
use crate::config::Config;
use anyhow::{bail, Context, Result};
use console::style;
use std::path::Path;

pub fn exec(explicit: Option<&Path>, action: ConfigAction) -> Result<()> {
    let path = Config::config_path(explicit).context("Failed to locate config file")?;

    match action {
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                bail!(
                    "Config file already exists at {} (use --force to overwrite)",
                    path.display()
                );
            }
            Config::default()
                .save(&path)
                .context("Failed to write config file")?;
            println!("Configuration written to {}", style(path.display()).cyan());
        }
        ConfigAction::Show => {
            let config = Config::load(Some(&path)).context("Failed to load config")?;
            println!("# {}", path.display());
            print!(
                "{}",
                toml::to_string_pretty(&config.masked()).context("Failed to render config")?
            );
        }
    }
    Ok(())
}
