//! # Launchable
//!
//! This crate defines the value every provider emits and every query
//! resolves to: a [`Launchable`].
//!
//! ## Features
//!
//! - **Tagged Variants**: files, folders, shortcuts, bookmarks and devices
//! - **Identity Equality**: two launchables are equal iff their resolved
//!   target is equal, whichever provider produced them
//! - **Launching**: open targets with the platform opener or spawn commands
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Launchable                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  name ──► Identity ──► LaunchableKind                           │
//! │                              │                                  │
//! │                              ▼                                  │
//! │                 open::that_detached / Runner                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod bookmark;
pub mod error;
pub mod identity;
pub mod launchable;
pub mod runner;

pub use bookmark::create_bookmark;
pub use error::{LaunchError, Result};
pub use identity::Identity;
pub use launchable::{Launchable, LaunchableKind};
pub use runner::Runner;
