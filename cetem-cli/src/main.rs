//! cetem command-line entry point

use clap::Parser;

use cetem_cli::commands::Commands;

/// Stream the CETEM Público annotated corpus at a chosen granularity
#[derive(Debug, Parser)]
#[command(name = "cetem", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Process(args) => args.execute(),
        Commands::Validate(args) => args.execute(),
    };

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
