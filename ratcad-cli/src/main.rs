//! A thin, non-interactive batch driver (§6): reads a variable order and a
//! conjunction of constraints in the grammar of [`parser`], runs
//! [`ratcad_cad::Cad::check`], and prints the result in the same grammar.
//!
//! Not the interactive shell the spec marks out of scope (no readline, no
//! tab completion): one request in, one answer out, exiting with the codes
//! of §6.

mod driver;
mod error;
mod eval;
mod parser;

use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::Parser as ClapParser;
use log::info;
use ratcad_cad::{CancellationToken, Settings};

/// ratcad: decide satisfiability of a conjunction of polynomial sign
/// constraints over the reals.
#[derive(ClapParser, Debug)]
#[command(name = "ratcad", version, about)]
struct Cli {
    /// Read the variable order and constraints from this file instead of stdin.
    #[arg(long)]
    input: Option<String>,

    /// Abort the search and report `Cancelled` after this many milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Prefer sample points strictly between roots over root points.
    #[arg(long)]
    prefer_nonroot_samples: bool,

    /// Process elimination polynomials of lower degree first.
    #[arg(long)]
    lowdeg_first: bool,

    /// Replace equality-constrained polynomials by a reduced Groebner basis
    /// before projection.
    #[arg(long)]
    groebner_preprocess: bool,

    /// Skip isolating a polynomial's roots if none can exist under the
    /// current partial sample.
    #[arg(long)]
    realrootcount_heuristic: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let input = match read_input(&cli.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("ratcad: {e}");
            return ExitCode::from(1);
        }
    };

    let settings = Settings {
        prefer_nonroot_samples: cli.prefer_nonroot_samples,
        lowdeg_first: cli.lowdeg_first,
        groebner_preprocess: cli.groebner_preprocess,
        realrootcount_heuristic: cli.realrootcount_heuristic,
        ..Settings::default()
    };

    let token = CancellationToken::new();
    let _timer = cli.timeout_ms.map(|ms| spawn_timeout(token.clone(), ms));

    match driver::run(&input, settings, &token) {
        Ok(outcome) => {
            info!("check finished: {outcome:?}");
            println!("{}", driver::render(&outcome));
            ExitCode::from(driver::exit_code(&outcome))
        }
        Err(e) => {
            eprintln!("ratcad: {e}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn read_input(path: &Option<String>) -> io::Result<String> {
    match path {
        Some(p) => fs::read_to_string(p),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Spawn the one thread this workspace ever spawns: a background timer that
/// cancels `token` after `ms` milliseconds, strictly outside the
/// single-threaded engine itself (§5 constrains the engine, not a driver
/// wrapping it). The process exits as soon as `main` returns, so there is
/// nothing to join: a search that finishes early just leaves this thread
/// sleeping until then.
fn spawn_timeout(token: CancellationToken, ms: u64) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(ms));
        token.cancel();
    })
}
