use std::env;
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use log::{debug, info, LevelFilter};

use mergebu::{LogObserver, TraceWriter};

const USAGE: &str = "\
Sorts whitespace separated tokens with bottom-up merge sort, one token per line.

Usage: mergebu [--trace] [PATH]

Reads from stdin if PATH is missing or '-'.
  --trace   Print every pass and merge to stderr.
  --help    Print this message.";

struct Args {
    trace: bool,
    path: Option<String>,
}

/// Returns `None` if `--help` was passed.
fn parse_args() -> Result<Option<Args>> {
    let mut args = Args {
        trace: false,
        path: None,
    };

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--trace" => args.trace = true,
            "--help" | "-h" => return Ok(None),
            "-" => args.path = None,
            flag if flag.starts_with('-') => bail!("Unknown flag '{flag}'\n\n{USAGE}"),
            path => {
                if let Some(prev) = &args.path {
                    bail!("Only one input path is supported, got '{prev}' and '{path}'");
                }
                args.path = Some(path.to_owned());
            }
        }
    }

    Ok(Some(args))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path).with_context(|| format!("Failed to read {path}")),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    let Some(args) = parse_args()? else {
        println!("{USAGE}");
        return Ok(());
    };
    let input = read_input(args.path.as_deref())?;

    let mut tokens = input
        .split_whitespace()
        .map(str::to_owned)
        .collect::<Vec<_>>();
    info!("Sorting {} tokens", tokens.len());

    let start = Instant::now();
    if args.trace {
        let mut trace = TraceWriter::new(BufWriter::new(io::stderr().lock()));
        mergebu::sort_by_observed(&mut tokens, |a, b| a.cmp(b), &mut (&mut trace, LogObserver));

        trace.finish().context("Failed to write trace")?;
        debug!(
            "{} passes, {} merges",
            mergebu::pass_count(tokens.len()),
            tokens.len().saturating_sub(1)
        );
    } else {
        mergebu::sort(&mut tokens);
    }
    debug!("Sort took {:?}", start.elapsed());

    let mut out = BufWriter::new(io::stdout().lock());
    for token in &tokens {
        writeln!(out, "{token}")?;
    }
    out.flush().context("Failed to write output")?;

    Ok(())
}
