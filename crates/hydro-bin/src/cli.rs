//! Command-line surface (§6.2): the external launcher's narrow contract —
//! grid base name, cohort size, this worker's rank, step count, `dt` — plus
//! the `--cartesian` quick-smoke mode and `--balance` strategy switch added
//! by SPEC_FULL.md §3.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use core_io::BalanceStrategy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Balance {
    Lpt,
    Circular,
}

impl From<Balance> for BalanceStrategy {
    fn from(b: Balance) -> Self {
        match b {
            Balance::Lpt => BalanceStrategy::Lpt,
            Balance::Circular => BalanceStrategy::Circular,
        }
    }
}

/// CLI arguments for the `hydro` launcher.
#[derive(Parser, Debug)]
#[command(name = "hydro", version, about = "Distributed multi-block structured-grid CFD engine")]
pub struct Args {
    /// Base name shared by `<base>.pfg` and `<base>.ibc` (required unless `--cartesian`).
    pub base: Option<PathBuf>,

    /// Number of ranks in the worker cohort.
    #[arg(short = 'R', long = "cohort-size", default_value_t = 1)]
    pub cohort_size: i32,

    /// Print only this rank's report after the run; omit to print every rank.
    #[arg(long)]
    pub rank: Option<i32>,

    /// Number of Godunov steps to advance.
    #[arg(short = 'n', long = "steps", default_value_t = 1)]
    pub steps: u32,

    /// Time step size.
    #[arg(long, default_value_t = 1.0e-3)]
    pub dt: f64,

    /// Block-to-rank balancing strategy.
    #[arg(long, value_enum, default_value_t = Balance::Lpt)]
    pub balance: Balance,

    /// Skip the `.pfg`/`.ibc` loader and build a single uniform Cartesian
    /// block directly from the reference initial condition (§4.2).
    #[arg(long)]
    pub cartesian: bool,

    /// Cartesian mode: cell counts along i, j, k.
    #[arg(long = "ni", default_value_t = 10, requires = "cartesian")]
    pub ni: usize,
    #[arg(long = "nj", default_value_t = 1, requires = "cartesian")]
    pub nj: usize,
    #[arg(long = "nk", default_value_t = 1, requires = "cartesian")]
    pub nk: usize,

    /// Cartesian mode: physical extents along x, y, z.
    #[arg(long = "lx", default_value_t = 1.0, requires = "cartesian")]
    pub lx: f64,
    #[arg(long = "ly", default_value_t = 1.0, requires = "cartesian")]
    pub ly: f64,
    #[arg(long = "lz", default_value_t = 1.0, requires = "cartesian")]
    pub lz: f64,
}
