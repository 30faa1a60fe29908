use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{classify, info};

#[derive(Parser, Debug)]
#[command(
    name = "chainforge",
    about = "A command-line tool that recovers bonds, polymers, residues and molecules from a flat pool of atoms.",
    version,
    author,
    arg_required_else_help = true
)]
struct Cli {
    /// Input JSON frame. When omitted, stdin is used.
    #[arg(short, long, value_name = "FILE", global = true)]
    input: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify every atom into polymers, molecules, ions and water.
    Classify(classify::ClassifyArgs),
    /// Print bond-graph statistics without classifying.
    Info(info::InfoArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let frame = commands::load_frame(cli.input.as_deref())?;

    match cli.command {
        Command::Classify(args) => classify::run(&frame, &args)?,
        Command::Info(args) => info::run(&frame, &args)?,
    }

    Ok(())
}
