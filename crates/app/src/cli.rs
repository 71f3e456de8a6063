use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, PartialEq, Default)]
#[command(name = "tzclock")]
#[command(about = "A terminal clock kept in sync with a time server for any timezone")]
pub struct CliArgs {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base URL of the time server (overrides config)
    #[arg(long)]
    pub server_url: Option<String>,

    /// Timezone to show on startup, e.g. Europe/London (overrides config)
    #[arg(long)]
    pub zone: Option<String>,

    /// Where to write logs
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
