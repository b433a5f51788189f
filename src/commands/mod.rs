//! Subcommand implementations

pub(crate) mod build;
pub(crate) mod probe;
pub(crate) mod show_config;
