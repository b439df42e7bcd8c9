//! Command line front end for the launcher.

pub mod commands;
pub mod config;
pub mod history;
pub mod logging;

pub use config::LauncherConfig;
pub use history::HistoryFile;
