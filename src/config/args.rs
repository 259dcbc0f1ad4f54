//! Command-line argument parsing
//!
//! Flags override values from the configuration file and the environment.
//! `-h` selects the bind host, so the help flag is long-only.

use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Default, Clone)]
#[command(name = "redlink", version, about, disable_help_flag = true)]
pub struct Args {
    /// Bind address to listen on
    #[arg(short = 'h', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Base URL prepended to short ids in listings
    #[arg(short = 'b', long)]
    pub base: Option<String>,

    /// Redis address (`host:port` or `redis://` URL)
    #[arg(short = 'r', long)]
    pub redis: Option<String>,

    /// Shared secret required to create links
    #[arg(short = 'a', long)]
    pub auth_code: Option<String>,

    /// Path to the TOML configuration file
    #[arg(short = 'c', long)]
    pub config: Option<String>,

    /// Print a sample configuration file and exit
    #[arg(long)]
    pub generate_config: bool,

    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,
}
