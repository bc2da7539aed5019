//! Common CLI types

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - indented JSON, one document per payload (default)
    #[default]
    Pretty,
    /// JSON format - one compact JSON document per line
    Json,
}
