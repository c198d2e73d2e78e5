//! Top-level registry: blocks, interfaces, the current layer bit, and the
//! shadow-exchange timer.

use crate::block::Block;
use crate::error::GridError;
use crate::interface::{Interface, SHADOW_DEPTH};
use crate::timer::Timer;

#[derive(Debug)]
pub struct Grid {
    blocks: Vec<Block>,
    interfaces: Vec<Interface>,
    layer: u8,
    pub exchange_timer: Timer,
    pub step_timer: Timer,
}

impl Grid {
    pub fn new(blocks: Vec<Block>, interfaces: Vec<Interface>) -> Self {
        Self {
            blocks,
            interfaces,
            layer: 0,
            exchange_timer: Timer::new(),
            step_timer: Timer::new(),
        }
    }

    /// A single-block, interface-free Cartesian grid built directly from the
    /// reference initial condition (§4.2), used by quick smoke runs and by
    /// the E1 end-to-end scenario.
    pub fn solid_descartes(ni: usize, nj: usize, nk: usize, lx: f64, ly: f64, lz: f64) -> Self {
        let mut block = Block::new_inactive(0, ni, nj, nk);
        block.init_solid_descartes(lx, ly, lz);
        Self::new(vec![block], Vec::new())
    }

    pub fn blocks_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn interfaces_count(&self) -> usize {
        self.interfaces.len()
    }

    pub fn block(&self, n: usize) -> &Block {
        &self.blocks[n]
    }

    pub fn block_mut(&mut self, n: usize) -> &mut Block {
        &mut self.blocks[n]
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.blocks
    }

    pub fn interface(&self, n: usize) -> &Interface {
        &self.interfaces[n]
    }

    pub fn interface_mut(&mut self, n: usize) -> &mut Interface {
        &mut self.interfaces[n]
    }

    pub fn interfaces(&self) -> &[Interface] {
        &self.interfaces
    }

    pub fn interfaces_mut(&mut self) -> &mut [Interface] {
        &mut self.interfaces
    }

    pub fn layer(&self) -> u8 {
        self.layer
    }

    /// Flip current/next. Idempotent under two consecutive calls (§8 invariant 7).
    pub fn swap_layers(&mut self) {
        self.layer ^= 1;
    }

    pub fn cells_count(&self) -> usize {
        self.blocks.iter().map(Block::cells_count).sum()
    }

    pub fn bytes_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| b.is_active())
            .map(|b| b.cells_count() * std::mem::size_of::<crate::cell::Cell>())
            .sum()
    }

    pub fn iface_cells_count(&self) -> usize {
        self.interfaces.iter().map(Interface::cells_count).sum()
    }

    pub fn shadow_cells_count(&self) -> usize {
        self.iface_cells_count() * SHADOW_DEPTH
    }

    pub fn inner_cells_count(&self) -> usize {
        self.cells_count().saturating_sub(self.border_cells_count())
    }

    pub fn border_cells_count(&self) -> usize {
        self.iface_cells_count()
    }

    /// Count of cells whose halo crosses a rank boundary (§2 "Grid.Mpi_Cells_Count").
    pub fn mpi_cells_count(&self) -> usize {
        self.interfaces
            .iter()
            .filter(|iface| iface.is_cross_rank())
            .map(Interface::cells_count)
            .sum::<usize>()
            * SHADOW_DEPTH
    }

    pub fn validate_interface_pairing(&self) -> Result<(), GridError> {
        for pos in (0..self.interfaces.len()).step_by(2) {
            let Some(b) = self.interfaces.get(pos) else {
                return Err(GridError::InvariantViolation {
                    reason: format!("interface registry has odd length at position {pos}"),
                });
            };
            let Some(n) = self.interfaces.get(pos + 1) else {
                return Err(GridError::InvariantViolation {
                    reason: format!("interface id {} at position {pos} is unpaired", b.id),
                });
            };
            if b.id != n.id {
                return Err(GridError::InvariantViolation {
                    reason: format!(
                        "interface pair at positions {pos}/{} has mismatched ids {} != {}",
                        pos + 1,
                        b.id,
                        n.id
                    ),
                });
            }
        }
        Ok(())
    }
}
