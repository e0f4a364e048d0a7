//! Business operations shared by the CLI commands

pub mod auth;
