//! Pure ordering functions for task lists.
//!
//! # Responsibility
//! - Provide per-key sort strategies and criteria dispatch.
//! - Provide locale-aware title collation and the sort picker presets.
//!
//! # Invariants
//! - No function in this module mutates its input or returns an error.

pub mod collation;
pub mod preset;
pub mod strategy;
