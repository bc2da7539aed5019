//! CLI definition and handlers

use clap::Parser;

pub mod args;
pub mod context;
pub mod report;

pub use args::{GlobalOptions, OutputFormat};
pub use context::RunContext;

use crate::client::models::ScanType;

/// halo-issues - report open Halo security issues across a server group hierarchy
#[derive(Parser, Debug)]
#[command(name = "halo-issues")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// File containing API credentials (key_id|secret per line)
    #[arg(long = "auth", value_name = "FILE", env = "HALO_AUTH_FILE", hide_env = true)]
    pub auth_file: Option<String>,

    /// Report on the group with this name (default: all root groups)
    #[arg(long, value_name = "NAME")]
    pub group: Option<String>,

    /// URL of the Halo REST API
    #[arg(long = "base", value_name = "URL", env = "HALO_API_BASE", hide_env = true)]
    pub base_url: Option<String>,

    /// Port of the Halo REST API, used when the URL names none
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Display details of each issue
    #[arg(long)]
    pub detailed: bool,

    /// Limit results to one or more scan types (comma separated)
    #[arg(long = "scan", value_name = "TYPES", value_enum, value_delimiter = ',')]
    pub scan_types: Vec<ScanType>,

    /// Display performance stats of REST API usage
    #[arg(long = "apistats", alias = "apistat")]
    pub api_stats: bool,

    /// Only report on the selected groups, not their descendants
    #[arg(long)]
    pub no_recurse: bool,

    /// Servers requested per page
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Print the group hierarchy instead of the issue report
    #[arg(long)]
    pub tree: bool,

    /// Write the report to a file instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<String>,

    /// Output format (pretty, json)
    #[arg(
        long,
        env = "HALO_ISSUES_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override settings file location
    #[arg(long, env = "HALO_ISSUES_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Report progress on stderr
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, env = "HALO_ISSUES_DEBUG", hide_env = true)]
    pub debug: bool,
}
