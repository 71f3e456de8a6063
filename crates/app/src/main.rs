use anyhow::Result;
use clap::Parser;
use tzclock::cli::CliArgs;

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    if let Err(e) = tzclock::runtime::run(cli_args).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
