//! Core types for the reminders CLI.
//!
//! This crate provides everything the CLI needs apart from argument parsing:
//! - `reminder` for reminder, alarm and list records
//! - `date_spec` for the compact due-date grammar (`H`, `H:M`, `Nd...`)
//! - `format` for text-line and JSON document rendering
//! - `store` for the reminders store capability and its directory-backed implementation

pub mod config;
pub mod date_spec;
pub mod error;
pub mod format;
pub mod handoff;
pub mod reminder;
pub mod store;

// Re-export record types at crate root for convenience
pub use reminder::*;
