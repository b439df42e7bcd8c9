//! # Resolver
//!
//! This crate maps free text to a ranked list of launchables.
//!
//! ## Features
//!
//! - **Total Input**: any string resolves; symbols fold away instead of
//!   failing the query
//! - **Tiered Scoring**: exact, prefix, substring, word-prefix and
//!   subsequence matches never interleave
//! - **Frecency**: launch history lifts frequently and recently used items
//! - **Deterministic Ordering**: ties fall back to history, name, identity
//!   and catalog order
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            Resolver                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  query ──► Query ──► Scorer ──► rank ──► Vec<Match>             │
//! │                                  ▲                              │
//! │                                  │                              │
//! │                            HistoryLookup                        │
//! │                                                                 │
//! │  Finder: Catalog::snapshot ──► Resolver ──► launch ──► history  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod finder;
pub mod history;
pub mod normalize;
pub mod resolver;
pub mod scoring;

pub use config::ResolverConfig;
pub use error::{ResolverError, Result};
pub use finder::Finder;
pub use history::{FrecencyHistory, HistoryLookup, NoHistory, UsageEntry};
pub use normalize::{Query, normalize};
pub use resolver::{Match, Resolver};
pub use scoring::Scorer;
