//! `hydro` — the external-collaborator launcher named in §6.2: parses CLI
//! arguments, loads (or Cartesian-constructs) the grid, runs `n` Godunov
//! steps with halo exchange between them, and prints the structure/timer
//! report. Exits non-zero on any fatal [`core_grid::GridError`] (§7).

use std::path::Path;
use std::sync::Once;

use clap::Parser;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

use core_grid::{Grid, GridError};
use core_io::load;
use core_solver::{AverageRiemann, GodunovStep};
use core_transport::{exchange, LocalCohort, LocalTransport};

use hydro_bin::cli::Args;
use hydro_bin::report::Report;

fn configure_logging() -> Option<WorkerGuard> {
    let log_path = Path::new("hydro.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(log_path);
    }
    let file_appender = tracing_appender::rolling::never(".", "hydro.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(writer)
        .try_init()
    {
        Ok(()) => Some(guard),
        Err(_) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn main() {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", cohort_size = args.cohort_size, steps = args.steps, "startup");

    if let Err(err) = run(&args) {
        error!(target: "runtime", error = %err, "fatal");
        eprintln!("hydro: {err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), GridError> {
    if args.cartesian {
        return run_cartesian(args);
    }
    let Some(base) = &args.base else {
        return Err(GridError::InputMissing {
            path: "<no base name given; pass one or use --cartesian>".to_string(),
        });
    };
    run_cohort(args, base.to_string_lossy().as_ref())
}

/// Single-block smoke mode (SPEC_FULL.md §3): bypasses the loader entirely.
fn run_cartesian(args: &Args) -> Result<(), GridError> {
    let mut grid = Grid::solid_descartes(args.ni, args.nj, args.nk, args.lx, args.ly, args.lz);
    let step = GodunovStep::<AverageRiemann>::default();
    for n in 0..args.steps {
        info!(target: "runtime.step", step = n, "advancing cartesian grid");
        step.run(&mut grid, args.dt)?;
    }
    print!(
        "{}",
        Report {
            grid: &grid,
            rank: 0,
            cohort_size: 1,
            steps: args.steps,
            step_elapsed: grid.step_timer.elapsed(),
            exchange_elapsed: grid.exchange_timer.elapsed(),
        }
    );
    Ok(())
}

/// Runs the full cohort in-process: one OS thread per rank, communicating
/// over the [`LocalTransport`] that stands in for the original's raw MPI
/// calls (§9 "Global MPI-via-singleton for rank lookup"). Each thread loads
/// its own rank's view of the grid exactly as a real SPMD worker would.
fn run_cohort(args: &Args, base: &str) -> Result<(), GridError> {
    let cohort_size = args.cohort_size;
    if cohort_size <= 0 {
        return Err(GridError::InvariantViolation {
            reason: format!("cohort size must be positive, got {cohort_size}"),
        });
    }

    let mut transports: Vec<LocalTransport> = LocalCohort::build(cohort_size);
    let results = std::thread::scope(|scope| {
        let handles: Vec<_> = transports
            .iter_mut()
            .enumerate()
            .map(|(rank, transport)| {
                let rank = rank as i32;
                scope.spawn(move || run_rank(args, base, rank, transport))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("worker thread panicked"))
            .collect::<Vec<_>>()
    });

    for (rank, result) in results.into_iter().enumerate() {
        let report_text = result?;
        if args.rank.is_none() || args.rank == Some(rank as i32) {
            print!("{report_text}");
        }
    }
    Ok(())
}

fn run_rank(
    args: &Args,
    base: &str,
    rank: i32,
    transport: &mut LocalTransport,
) -> Result<String, GridError> {
    let mut grid = load(base, args.cohort_size, rank, args.balance.into())?;
    let step = GodunovStep::<AverageRiemann>::default();
    for n in 0..args.steps {
        info!(target: "runtime.step", rank, step = n, "exchanging halos");
        exchange(&mut grid, transport)?;
        step.run(&mut grid, args.dt)?;
    }
    Ok(Report {
        grid: &grid,
        rank,
        cohort_size: args.cohort_size,
        steps: args.steps,
        step_elapsed: grid.step_timer.elapsed(),
        exchange_elapsed: grid.exchange_timer.elapsed(),
    }
    .to_string())
}
