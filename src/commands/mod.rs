//! CLI commands

pub mod init;
pub mod list;
pub mod show;
