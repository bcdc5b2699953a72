use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kandex::build::{load_and_compile, run_build, OutputFormat};

mod cli;
use cli::{display, Cli, Commands};

fn init_tracing(verbose: bool) {
    let default = if verbose { "kandex=debug" } else { "kandex=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build(input: &str, output: &str, json: bool, quiet: bool) -> Result<()> {
    let format = if json {
        OutputFormat::Json
    } else {
        OutputFormat::CHeaders
    };
    let report = run_build(Path::new(input), Path::new(output), format, !quiet)
        .with_context(|| format!("build of {} failed", input))?;
    display::print_build_summary(&report, output);
    Ok(())
}

fn lookup(input: &str, class: kandex::ReadingClass, kana: &str) -> Result<()> {
    let dictionary = load_and_compile(Path::new(input), false)?;
    match dictionary.lookup(class, kana)? {
        Some(record) => display::print_record(class, record, &dictionary.catalog),
        None => println!("no {} reading for '{}'", class, kana),
    }
    Ok(())
}

fn check(input: &str) -> Result<()> {
    let dictionary = load_and_compile(Path::new(input), false)?;
    display::print_check_summary(&dictionary);
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Build {
            input,
            output,
            json,
            quiet,
        } => build(&input, &output, json, quiet),
        Commands::Lookup { input, class, kana } => lookup(&input, class, &kana),
        Commands::Check { input } => check(&input),
    };

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}
