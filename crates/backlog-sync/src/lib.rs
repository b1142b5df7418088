//! Backlog synchronization engine.
//!
//! Turns the embedded sprint backlog into create-issue requests against
//! one of several project-management platforms, or a CSV file as a
//! no-network fallback.
//!
//! # Architecture
//!
//! - [`task`] — canonical immutable [`Task`](task::Task) model.
//! - [`schedule`] — static schedule table and deterministic task
//!   generation.
//! - [`adapters`] — the [`IssueAdapter`](adapters::IssueAdapter) trait
//!   and one implementation per destination (Jira, GitHub, Azure
//!   DevOps, CSV), selected once at startup.
//! - [`driver`] — sequential upload loop with fail-fast policy.
//! - [`config`] — per-platform credential bundles, loaded leniently
//!   from JSON.
//!
//! Each submission is one remote call; there are no retries, no
//! batching, and no record of partial progress across runs.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod adapters;
pub mod config;
pub mod driver;
pub mod error;
pub mod schedule;
pub mod task;

pub use adapters::{for_platform, IssueAdapter, Platform};
pub use config::SyncConfig;
pub use driver::{SyncDriver, SyncOutcome};
pub use error::AdapterError;
pub use task::{IssueRef, Priority, Task};
