//! # Directory Watcher
//!
//! This crate provides file system monitoring for the launcher catalog.
//! It watches folders that contribute launchables and reports created,
//! deleted and renamed entries to a caller-supplied callback.
//!
//! ## Features
//!
//! - **Change Masks**: Subscribe to any combination of change kinds
//! - **Hidden Filtering**: Hidden entries are never surfaced
//! - **Resolved Entries**: Callbacks receive a described entry, not a raw path
//! - **Scanning**: Enumerate the files a folder currently holds
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Directory Watcher                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  WatchConfig ──► DirectoryWatcher ──► FileEvent ──► callback    │
//! │       │                  │                │                     │
//! │       ▼                  ▼                ▼                     │
//! │   ChangeMask       notify watcher     FileEntry                 │
//! │                                                                 │
//! │  ScanConfig ──► DirectoryScanner ──► files                      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Debouncing is deliberately absent here; callers gate the callback.

pub mod config;
pub mod error;
pub mod event;
pub mod scanner;
pub mod watcher;

pub use config::{ScanConfig, WatchConfig};
pub use error::{Result, WatcherError};
pub use event::{ChangeKind, ChangeMask, FileEntry, FileEvent, is_hidden_under};
pub use scanner::DirectoryScanner;
pub use watcher::DirectoryWatcher;
