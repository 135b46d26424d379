mod commands;
mod logging;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use commands::{convert::ConvertArgs, schema::SchemaArgs};

#[derive(Parser)]
#[command(name = "columnify", about = "Convert records into Parquet")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert record files to a Parquet file
    Convert(ConvertArgs),
    /// Print the intermediate schema derived from a schema file
    Schema(SchemaArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Convert(args) => args.run(),
        Commands::Schema(args) => args.run(),
    }
}
