//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical task record and its create/update payloads.
//! - Keep validation rules next to the data they protect.
//!
//! # Invariants
//! - Every persisted task is identified by a stable, non-nil `TaskId`.
//! - A task title is never blank.

pub mod task;
