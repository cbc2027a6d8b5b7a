mod cli;

use std::{
    fs::File,
    io::{self, BufWriter, Read},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, error::ErrorKind};
use cli::Args;
use siebelmsg::DecodeStats;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            // clap exits with 2 on usage errors; this tool always uses 1.
            if let Err(err) = e.print() {
                log::error!("could not report usage error: {err}");
            }
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(stats) => {
            log::info!(
                "decoded {} fragments in {} groups from {} bytes",
                stats.fragments,
                stats.groups,
                stats.bytes_read
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("smp: {err:#}");
            eprintln!("{}", Args::command().render_usage());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<DecodeStats> {
    let input: Box<dyn Read> = if args.is_stdin() {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(&args.input).with_context(|| args.input.clone())?;
        Box::new(file)
    };

    let stdout = BufWriter::new(io::stdout().lock());
    let stats = siebelmsg::decode(input, stdout).with_context(|| args.input.clone())?;
    Ok(stats)
}
