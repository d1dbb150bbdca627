//! CLI command implementations

pub mod completion;
pub mod config;
pub mod generate;
pub mod init;
pub mod presets;
