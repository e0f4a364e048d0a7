//! config 子命令实现

use clap::Subcommand;

use crate::error::Result;
use crate::storage::config::{config_path, save_config, Config};

use super::Workspace;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
}

pub fn execute(ws: &Workspace, action: ConfigAction) -> Result<()> {
    let path = config_path(&ws.data_dir);
    match action {
        ConfigAction::Init => {
            if path.exists() {
                println!("Config already exists: {}", path.display());
            } else {
                save_config(&ws.data_dir, &Config::default())?;
                println!("Wrote {}", path.display());
            }
        }
        ConfigAction::Show => {
            println!("# {}", path.display());
            print!("{}", toml::to_string_pretty(&ws.config)?);
        }
    }
    Ok(())
}
