//! Core use-case services.
//!
//! # Responsibility
//! - Mediate between the view layer and the persistence collaborator.
//! - Keep view code decoupled from storage details.

pub mod task_synchronizer;
