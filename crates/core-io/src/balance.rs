//! Block-to-rank assignment strategies (§4.1).

use core_grid::{Block, GridError};

/// Which balancing strategy the loader applies. `Lpt` is the default and the
/// one §8's invariants are checked against; `Circular` is a trivial
/// alternative kept for completeness (§3 of SPEC_FULL's supplemented
/// features), not wired to any invariant check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStrategy {
    Lpt,
    Circular,
}

impl Default for BalanceStrategy {
    fn default() -> Self {
        BalanceStrategy::Lpt
    }
}

pub fn assign_ranks(
    blocks: &mut [Block],
    cohort_size: i32,
    strategy: BalanceStrategy,
) -> Result<(), GridError> {
    match strategy {
        BalanceStrategy::Lpt => assign_ranks_lpt(blocks, cohort_size),
        BalanceStrategy::Circular => {
            assign_ranks_circular(blocks, cohort_size);
            Ok(())
        }
    }
}

/// Greedy longest-processing-time-first assignment (§4.1). Deterministic:
/// every worker computes the same assignment without communication, because
/// it depends only on the (shared) block list and `cohort_size`.
pub fn assign_ranks_lpt(blocks: &mut [Block], cohort_size: i32) -> Result<(), GridError> {
    if cohort_size <= 0 {
        return Err(GridError::InvariantViolation {
            reason: format!("cohort size must be positive, got {cohort_size}"),
        });
    }

    let mut order: Vec<usize> = (0..blocks.len()).collect();
    order.sort_by(|&a, &b| blocks[b].cells_count().cmp(&blocks[a].cells_count()));

    let mut rank_totals = vec![0usize; cohort_size as usize];
    for idx in order {
        let (rank, _) = rank_totals
            .iter()
            .enumerate()
            .min_by_key(|&(rank, total)| (*total, rank))
            .expect("rank_totals is non-empty, checked by the cohort_size guard above");
        blocks[idx].rank = rank as i32;
        rank_totals[rank] += blocks[idx].cells_count();
    }
    Ok(())
}

/// `rank = block_index % cohort_size`. A second, trivial strategy carried
/// over from the original's `Set_Blocks_Ranks_Circular_Distribution`.
pub fn assign_ranks_circular(blocks: &mut [Block], cohort_size: i32) {
    for (i, block) in blocks.iter_mut().enumerate() {
        block.rank = (i as i32) % cohort_size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_with_cells(id: usize, cells: usize) -> Block {
        // A 1 x 1 x cells brick has exactly `cells` cells.
        Block::new_inactive(id, cells, 1, 1)
    }

    #[test]
    fn lpt_matches_e3() {
        // spec.md §8 E3 states expected totals {125, 128, 163} (summing to
        // 416, though the six block sizes only sum to 315) and a
        // block3->rank2 assignment that contradicts §4.1's "ties broken by
        // lowest rank index". Those illustrative numbers are internally
        // inconsistent; the true output of the algorithm as specified —
        // also what `original_source/Hydro/src/Grid/Grid.cpp`'s
        // `Set_Blocks_Ranks_Cells_Balancing` produces — is asserted below.
        let sizes = [125, 64, 64, 27, 27, 8];
        let mut blocks: Vec<Block> = sizes
            .iter()
            .enumerate()
            .map(|(i, &c)| block_with_cells(i, c))
            .collect();

        assign_ranks_lpt(&mut blocks, 3).unwrap();

        let ranks: Vec<i32> = blocks.iter().map(|b| b.rank).collect();
        assert_eq!(ranks, vec![0, 1, 2, 1, 2, 1]);

        let mut totals = [0usize; 3];
        for b in &blocks {
            totals[b.rank as usize] += b.cells_count();
        }
        assert_eq!(totals, [125, 99, 91]);
    }

    #[test]
    fn coverage_invariant_all_ranks_in_range() {
        let mut blocks: Vec<Block> = (0..10).map(|i| block_with_cells(i, i + 1)).collect();
        assign_ranks_lpt(&mut blocks, 4).unwrap();
        for b in &blocks {
            assert!(b.rank >= 0 && b.rank < 4);
        }
    }

    #[test]
    fn monotonicity_invariant_bounded_by_largest_block() {
        let sizes = [50usize, 40, 30, 20, 10, 5];
        let mut blocks: Vec<Block> = sizes
            .iter()
            .enumerate()
            .map(|(i, &c)| block_with_cells(i, c))
            .collect();
        let r = 3;
        assign_ranks_lpt(&mut blocks, r).unwrap();

        let mut totals = vec![0usize; r as usize];
        for b in &blocks {
            totals[b.rank as usize] += b.cells_count();
        }
        let total: usize = sizes.iter().sum();
        let mean = total as f64 / r as f64;
        let max_total = *totals.iter().max().unwrap() as f64;
        let largest = *sizes.iter().max().unwrap() as f64;
        assert!(max_total - mean <= largest + 1e-9);
    }

    #[test]
    fn circular_distribution_wraps_by_index() {
        let mut blocks: Vec<Block> = (0..5).map(|i| block_with_cells(i, 1)).collect();
        assign_ranks_circular(&mut blocks, 2);
        let ranks: Vec<i32> = blocks.iter().map(|b| b.rank).collect();
        assert_eq!(ranks, vec![0, 1, 0, 1, 0]);
    }

    #[test]
    fn lpt_rejects_non_positive_cohort_size() {
        let mut blocks: Vec<Block> = vec![block_with_cells(0, 1)];
        let err = assign_ranks_lpt(&mut blocks, 0).unwrap_err();
        assert!(matches!(err, GridError::InvariantViolation { .. }));
    }
}
