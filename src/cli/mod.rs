//! glbscope CLI - Command-line interface for GLB inspection

pub mod commands;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "glbscope")]
#[command(about = "glbscope: GLB container and glTF scene inspection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Run the glbscope CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    cli.command.execute()?;

    Ok(())
}
