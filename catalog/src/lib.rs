//! # Catalog
//!
//! This crate turns heterogeneous launchable sources into one catalog.
//!
//! ## Features
//!
//! - **Providers**: watched folders, shortcuts, bookmarks and devices behind
//!   one [`LaunchableProvider`] contract
//! - **Penalty Gate**: bulk filesystem churn raises at most one change per
//!   penalty period
//! - **Self-healing Folders**: folders deleted on disk drop out on the next
//!   enumeration
//! - **Level-triggered Snapshots**: the catalog recomputes once after any
//!   number of provider changes
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            Catalog                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  DirectoryWatcher ──► PenaltyGate ──► ChangeNotifier            │
//! │                                            │                    │
//! │  FolderProvider ─┐                         ▼                    │
//! │  ShortcutProvider├──► Catalog ◄── ChangeSubscription            │
//! │  BookmarkProvider│       │                                      │
//! │  DeviceProvider ─┘       ▼                                      │
//! │                   Arc<[Launchable]> snapshot                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod bookmarks;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod debounce;
pub mod devices;
pub mod error;
pub mod folders;
pub mod notifier;
pub mod provider;
pub mod shortcuts;

pub use bookmarks::BookmarkProvider;
pub use catalog::Catalog;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CatalogConfig, CommandShortcut, FolderConfig, ShortcutConfig};
pub use debounce::PenaltyGate;
pub use devices::{DeviceInfo, DeviceProvider, DeviceSource, StaticDeviceSource};
pub use error::{CatalogError, Result};
pub use folders::FolderProvider;
pub use notifier::{ChangeNotifier, ChangeSubscription};
pub use provider::LaunchableProvider;
pub use shortcuts::ShortcutProvider;
