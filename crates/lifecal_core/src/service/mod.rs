//! Use-case services built on top of core model and rendering.
//!
//! # Responsibility
//! - Orchestrate one calendar run for callers such as the CLI.

pub mod calendar_service;
