//! CLI 模块

pub mod auth;
pub mod config;
pub mod summary;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::storage::config::{load_config, Config};
use crate::storage::{default_data_dir, FileStore};

#[derive(Parser)]
#[command(name = "taskdesk")]
#[command(version)]
#[command(about = "Task board client: login, registration and dashboard summary")]
pub struct Cli {
    /// Data directory (defaults to ~/.taskdesk)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in with email and password
    Login {
        /// Account email (defaults to the remembered one)
        email: Option<String>,
        /// Password (prompted without echo when omitted)
        #[arg(long)]
        password: Option<String>,
        /// Remember the email for the next login
        #[arg(long)]
        remember: bool,
    },
    /// Create a new account
    Register {
        /// Full name, e.g. "Anna Berg"
        name: String,
        email: String,
        /// Accept the privacy policy
        #[arg(long)]
        accept_policy: bool,
    },
    /// Continue without an account
    Guest,
    /// Log out and clear the stored session
    Logout,
    /// Show the current identity and header badge
    Whoami,
    /// Show the dashboard summary
    Summary {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: config::ConfigAction,
    },
}

/// 命令执行上下文：数据目录、配置与存储
pub struct Workspace {
    pub data_dir: PathBuf,
    pub config: Config,
    pub store: FileStore,
}

impl Workspace {
    pub fn open(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        Ok(Self {
            config: load_config(&data_dir),
            store: FileStore::open(&data_dir),
            data_dir,
        })
    }
}

/// 统一调度
pub fn run(cli: Cli) -> Result<()> {
    let mut ws = Workspace::open(cli.data_dir)?;

    match cli.command {
        Commands::Login {
            email,
            password,
            remember,
        } => auth::login(&mut ws, email, password, remember),
        Commands::Register {
            name,
            email,
            accept_policy,
        } => auth::register(&mut ws, name, email, accept_policy),
        Commands::Guest => auth::guest(&mut ws),
        Commands::Logout => auth::logout(&mut ws),
        Commands::Whoami => summary::whoami(&ws),
        Commands::Summary { json } => summary::execute(&ws, json),
        Commands::Config { action } => config::execute(&ws, action),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login() {
        let cli = Cli::try_parse_from([
            "taskdesk",
            "login",
            "anna@x.io",
            "--remember",
            "--data-dir",
            "/tmp/board",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/board")));
        match cli.command {
            Commands::Login {
                email,
                password,
                remember,
            } => {
                assert_eq!(email.as_deref(), Some("anna@x.io"));
                assert!(password.is_none());
                assert!(remember);
            }
            _ => panic!("expected login"),
        }
    }

    #[test]
    fn test_parse_summary_json() {
        let cli = Cli::try_parse_from(["taskdesk", "summary", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Summary { json: true }));
        assert!(cli.data_dir.is_none());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["taskdesk"]).is_err());
    }

    #[test]
    fn test_workspace_open_with_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::open(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(ws.data_dir, dir.path());
        assert_eq!(ws.config, Config::default());

        summary::execute(&ws, false).unwrap();
        summary::whoami(&ws).unwrap();
    }
}
