//! Core types, configuration and prompt handling for shipnote
//!
//! Everything here is pure: no network access, and file I/O only for the
//! config file.

pub mod config;
pub mod export;
pub mod parse;
pub mod presets;
pub mod prompt;
pub mod provider;
pub mod request;
