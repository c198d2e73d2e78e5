//! Per-cell storage: center, volume, face areas and the two-layer fluid state.

use crate::direction::FaceDirection;
use crate::fluid::FluidState;
use crate::vector::Point3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub center: Point3,
    pub volume: f64,
    pub areas: [f64; 6],
    pub states: [FluidState; 2],
}

impl Cell {
    pub fn new(center: Point3, volume: f64, areas: [f64; 6]) -> Self {
        Self {
            center,
            volume,
            areas,
            states: [FluidState::default(); 2],
        }
    }

    pub fn area(&self, dir: FaceDirection) -> f64 {
        self.areas[dir.as_index()]
    }

    pub fn state(&self, layer: u8) -> &FluidState {
        &self.states[layer as usize]
    }

    pub fn state_mut(&mut self, layer: u8) -> &mut FluidState {
        &mut self.states[layer as usize]
    }
}
