use std::path::PathBuf;

use clap::Parser;
use refwidget_config::ContentMode;

/// Fetch the SaaSquatch referral widget for an advocate and display it.
#[derive(Debug, Clone, Parser)]
#[command(name = "refwidget")]
#[command(version, about)]
pub struct Cli {
    /// Path to the configuration file (defaults to ./refwidget.toml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Tenant alias for the API path (overrides SAASQUATCH_TENANT_ALIAS)
    #[arg(long, value_name = "ALIAS")]
    pub tenant_alias: Option<String>,

    /// Advocate user id, usually a hash of the email address
    #[arg(long, value_name = "ID")]
    pub user_id: Option<String>,

    /// Advocate account id, usually a hash of the email address
    #[arg(long, value_name = "ID")]
    pub account_id: Option<String>,

    /// Display density hint for the embedded document (mobile or desktop)
    #[arg(long, value_name = "MODE")]
    pub content_mode: Option<ContentMode>,

    /// Where to write the rendered widget document
    #[arg(short, long, value_name = "PATH", conflicts_with = "print")]
    pub output: Option<PathBuf>,

    /// Print the rendered document to stdout instead of opening a browser
    #[arg(short, long)]
    pub print: bool,

    /// Write the document but do not launch the system browser
    #[arg(long)]
    pub no_open: bool,

    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(long)]
    pub debug: bool,
}
