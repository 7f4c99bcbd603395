use std::{fs, io::Read, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use ll_grammar_helper::{
    task::{run, OutputFormat, Task},
    Grammar,
};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// symbols (1), nullable (2), first (3), follow (4), left-factor (5) or left-recursion (6)
    task: Task,

    /// File containing the grammar (default: standard input)
    file: Option<PathBuf>,

    /// Print in LaTeX format
    #[arg(short, long, conflicts_with = "json")]
    latex: bool,

    /// Print in JSON format
    #[arg(short, long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let input = match &cli.file {
        Some(path) => {
            info!("Reading grammar from `{}`", path.display());
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read standard input")?;
            input
        }
    };

    let grammar = Grammar::parse(&input).context("Grammar syntax error")?;

    let format = if cli.latex {
        OutputFormat::LaTeX
    } else if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Plain
    };

    println!("{}", run(&grammar, cli.task, format)?);
    Ok(())
}
