//! §8 invariant 5 / scenario E2, driven through the public `core_transport`
//! and `core_grid` APIs only.

use core_grid::{Block, Grid, Interface};
use core_transport::{exchange, LocalCohort};

fn two_block_pair(block0_rank: i32, block1_rank: i32, my_rank: i32) -> Grid {
    let mut b0 = Block::new_inactive(0, 4, 4, 4);
    let mut b1 = Block::new_inactive(1, 4, 4, 4);
    b0.rank = block0_rank;
    b1.rank = block1_rank;
    let active0 = block0_rank == my_rank;
    let active1 = block1_rank == my_rank;
    let fwd = Interface::new(9, 0, 1, 4, 4, 0, 4, 0, 4, active0, active1).unwrap();
    let bwd = Interface::new(9, 1, 0, 0, 0, 0, 4, 0, 4, active1, active0).unwrap();
    if active0 {
        b0.allocate();
    }
    if active1 {
        b1.allocate();
    }
    Grid::new(vec![b0, b1], vec![fwd, bwd])
}

#[test]
fn every_active_receiver_sees_the_senders_fill_value() {
    let mut cohort = LocalCohort::build(2);
    let mut t1 = cohort.pop().unwrap();
    let mut t0 = cohort.pop().unwrap();

    let mut g0 = two_block_pair(0, 1, 0);
    let mut g1 = two_block_pair(0, 1, 1);

    g0.interface_mut(0).fill_buffer(0.0);
    g0.interface_mut(1).fill_buffer(1.0);
    g1.interface_mut(0).fill_buffer(1.0);
    g1.interface_mut(1).fill_buffer(0.0);

    std::thread::scope(|scope| {
        let h0 = scope.spawn(|| exchange(&mut g0, &mut t0));
        let h1 = scope.spawn(|| exchange(&mut g1, &mut t1));
        h0.join().unwrap().unwrap();
        h1.join().unwrap().unwrap();
    });

    assert!(g0.interface(0).check_buffer(1.0, 1e-3));
    assert!(g1.interface(1).check_buffer(1.0, 1e-3));
}

#[test]
fn single_rank_cohort_makes_every_interface_a_colocated_no_op() {
    let mut cohort = LocalCohort::build(1);
    let mut t0 = cohort.pop().unwrap();
    let mut g = two_block_pair(0, 0, 0);
    g.interface_mut(0).fill_buffer(1.0);
    g.interface_mut(1).fill_buffer(0.0);
    exchange(&mut g, &mut t0).unwrap();
    assert!(g.interface(1).check_buffer(0.0, 1e-9));
}
