//! §8 scenarios E1 (tiny solid Cartesian) and the mass-conservation /
//! reflecting-wall invariants, driven through `core_solver`'s public API
//! against a grid built with `Grid::solid_descartes`.

use core_grid::{Grid, Vector3};
use core_solver::{AverageRiemann, GodunovStep};

#[test]
fn e1_tiny_solid_cartesian_stays_at_rest() {
    let mut grid = Grid::solid_descartes(10, 1, 1, 1.0, 1.0, 1.0);
    let step = GodunovStep::<AverageRiemann>::default();
    step.run(&mut grid, 1.0e-3).unwrap();

    for i in 0..10 {
        let state = grid.block(0).cell(i, 0, 0).state(grid.layer());
        assert!((state.r - 1.225).abs() < 1e-8);
        assert!(state.v == Vector3::ZERO || state.v.length_sq().sqrt() < 1e-8);
    }
}

#[test]
fn running_several_steps_keeps_a_perturbed_block_mass_conserving() {
    let mut grid = Grid::solid_descartes(5, 5, 5, 1.0, 1.0, 1.0);
    {
        let block = grid.block_mut(0);
        block.cell_mut(2, 2, 2).state_mut(0).v = Vector3::new(3.0, -1.0, 0.5);
    }
    let mass = |g: &Grid| -> f64 {
        (0..5)
            .flat_map(|i| (0..5).flat_map(move |j| (0..5).map(move |k| (i, j, k))))
            .map(|(i, j, k)| {
                let c = g.block(0).cell(i, j, k);
                c.state(g.layer()).r * c.volume
            })
            .sum()
    };

    let initial = mass(&grid);
    let step = GodunovStep::<AverageRiemann>::default();
    for _ in 0..5 {
        step.run(&mut grid, 1.0e-5).unwrap();
    }
    let after = mass(&grid);
    assert!((after - initial).abs() / initial < 1e-9);
}
