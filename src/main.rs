use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use flipsat::{Error, Result, Solver};

/// DPLL-style clause-learning SAT solver for DIMACS CNF input.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to a DIMACS CNF file.
    input: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("fatal error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> std::result::Result<(), Error> {
    let start = Instant::now();

    let input = std::fs::read_to_string(&args.input)?;
    let mut solver = Solver::from_dimacs(&input)?;

    let verdict = match solver.solve() {
        Result::Sat(_) => "SAT",
        Result::Unsat => "UNSAT",
    };

    let stats = solver.stats();
    eprintln!("v {verdict}");
    eprintln!(
        "c {} conflicts, {} decisions, {} propagations, {:.1}s, {}MB",
        stats.conflicts,
        stats.decisions,
        stats.propagations,
        start.elapsed().as_secs_f64(),
        peak_rss_mb(),
    );
    Ok(())
}

/// Peak resident set size of this process, in megabytes.
#[cfg(unix)]
fn peak_rss_mb() -> u64 {
    let mut usage: libc::rusage = unsafe { std::mem::zeroed() };
    if unsafe { libc::getrusage(libc::RUSAGE_SELF, &mut usage) } != 0 {
        return 0;
    }

    let peak = usage.ru_maxrss as u64;
    // ru_maxrss is reported in kilobytes on Linux, in bytes on macOS
    if cfg!(target_os = "macos") {
        peak / (1024 * 1024)
    } else {
        peak / 1024
    }
}

#[cfg(not(unix))]
fn peak_rss_mb() -> u64 {
    0
}
