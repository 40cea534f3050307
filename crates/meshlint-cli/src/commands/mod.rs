//! CLI subcommand implementations.

pub mod list_rules;
pub mod output;
pub mod profile_cmd;
pub mod scan;
