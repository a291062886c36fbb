//! Commit activity for GitHub repositories.
//!
//! The core is [`activity::aggregate`], a pure derivation of a daily commit
//! series and per-contributor breakdown from a fetched commit list. Around it
//! sit the GitHub commit source, the AI commit message rewriter and the CLI /
//! terminal shells.

pub mod activity;
pub mod app;
pub mod cli;
pub mod commits;
pub mod config;
pub mod config_cmd;
pub mod error;
pub mod github;
pub mod model;
pub mod rewrite;
pub mod tui;
pub mod util;

pub use activity::{aggregate, TimeWindow};
pub use error::{PulseError, Result};
pub use model::{ActivityReport, CommitRecord, ContributorSummary, DailyCount};
