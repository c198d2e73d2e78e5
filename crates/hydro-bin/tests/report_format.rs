use std::time::Duration;

use clap::Parser;
use core_grid::Grid;
use hydro_bin::report::Report;

#[test]
fn cartesian_report_names_the_single_block_and_zero_interfaces() {
    let grid = Grid::solid_descartes(6, 1, 1, 1.0, 1.0, 1.0);
    let report = Report {
        grid: &grid,
        rank: 0,
        cohort_size: 1,
        steps: 1,
        step_elapsed: Duration::from_millis(2),
        exchange_elapsed: Duration::ZERO,
    };
    let text = report.to_string();
    assert!(text.contains("interfaces=0"));
    assert!(text.contains("block[0] id=0 rank=0 active=true"));
    assert!(text.contains("1 step(s)"));
}

#[test]
fn cli_parses_cartesian_mode_flags() {
    let args = hydro_bin::cli::Args::try_parse_from([
        "hydro",
        "--cartesian",
        "--ni",
        "8",
        "--dt",
        "0.0005",
        "-n",
        "2",
    ])
    .unwrap();
    assert!(args.cartesian);
    assert_eq!(args.ni, 8);
    assert_eq!(args.steps, 2);
    assert!((args.dt - 0.0005).abs() < 1e-12);
}
