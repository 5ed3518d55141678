use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use lexiquery::QueryExpression;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Query expression, e.g. "foo BEF/2 bar AND LEN/5-20"
    #[arg(value_name = "EXPRESSION")]
    expression: String,

    /// Files to filter line by line (stdin if none)
    #[arg(value_name = "FILE")]
    files: Vec<String>,

    /// Only check the expression's grammar
    #[arg(long)]
    check: bool,

    /// Print the number of selected lines
    #[arg(short = 'c', long)]
    count: bool,

    /// Prefix each line with its line number
    #[arg(short = 'n', long)]
    line_number: bool,

    /// Select non-matching lines
    #[arg(short = 'v', long)]
    invert_match: bool,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.verbose);

    let expr = match QueryExpression::new(&args.expression) {
        Ok(expr) => expr,
        Err(err) => {
            eprintln!("Grammar error: {err}");
            return ExitCode::from(if args.check { 1 } else { 2 });
        }
    };
    if args.check {
        println!("valid");
        return ExitCode::SUCCESS;
    }

    match run(&args, &expr) {
        Ok(0) => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(2)
        }
    }
}

/// Filter every input, returning the number of selected lines.
fn run(args: &Args, expr: &QueryExpression) -> Result<usize> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut selected = 0;

    if args.files.is_empty() {
        selected += filter(io::stdin().lock(), "stdin", args, expr, &mut out)?;
    } else {
        for path in &args.files {
            let file = File::open(path).with_context(|| format!("Failed to open {path}"))?;
            selected += filter(BufReader::new(file), path, args, expr, &mut out)?;
        }
    }

    if args.count {
        writeln!(out, "{selected}")?;
    }
    Ok(selected)
}

/// Invalid UTF-8 is replaced rather than aborting the rest of the input.
fn filter(
    mut input: impl BufRead,
    name: &str,
    args: &Args,
    expr: &QueryExpression,
    out: &mut impl Write,
) -> Result<usize> {
    let mut selected = 0;
    let mut buf = Vec::new();
    for idx in 0.. {
        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .with_context(|| format!("Failed to read {name}"))?;
        if read == 0 {
            break;
        }
        let line = String::from_utf8_lossy(trim_newline(&buf));
        if expr.query(&line) == args.invert_match {
            continue;
        }
        selected += 1;
        if args.count {
            continue;
        }
        if args.line_number {
            writeln!(out, "{}:{}", idx + 1, line)?;
        } else {
            writeln!(out, "{line}")?;
        }
    }
    log::debug!("{selected} line(s) selected from {name}");
    Ok(selected)
}

fn trim_newline(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn init_logger(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}
