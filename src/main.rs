use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::Path;
use stillwave_assets::{icons, sounds};

#[derive(Parser)]
#[command(name = "stillwave-assets")]
#[command(about = "Offline asset generation for the Stillwave app", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate the iOS icon set, manifest, and splash screen
    Icons,
    /// Regenerate the binaural audio loops
    Sounds,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Icons => icons::run(Path::new(".")),
        Commands::Sounds => sounds::run(Path::new(".")),
    }
}
