//! A rectilinear cell brick: the unit of distribution and ownership.

use crate::cell::Cell;
use crate::direction::FaceDirection;
use crate::facet::Facet;
use crate::fluid::FluidState;
use crate::vector::{Axis, Point3};

/// `cell(i,j,k) = (k*Nj + j)*Ni + i` (§4.2).
pub fn cell_index(i: usize, j: usize, k: usize, ni: usize, nj: usize) -> usize {
    (k * nj + j) * ni + i
}

/// `node(i,j,k) = (k*(Nj+1) + j)*(Ni+1) + i` (§4.2).
pub fn node_index(i: usize, j: usize, k: usize, ni: usize, nj: usize) -> usize {
    (k * (nj + 1) + j) * (ni + 1) + i
}

#[derive(Debug, Clone)]
pub struct Block {
    pub id: usize,
    /// Owning rank, or `-1` before the balancer assigns it.
    pub rank: i32,
    /// Whether this worker owns this block's cell/node storage.
    active: bool,
    ni: usize,
    nj: usize,
    nk: usize,
    cells: Vec<Cell>,
    nodes: Vec<Point3>,
    facets: [Facet; 6],
}

impl Block {
    /// Build an inactive placeholder block (no cell/node storage) with the
    /// given extents. Used by the loader before ranks are known.
    pub fn new_inactive(id: usize, ni: usize, nj: usize, nk: usize) -> Self {
        Self {
            id,
            rank: -1,
            active: false,
            ni,
            nj,
            nk,
            cells: Vec::new(),
            nodes: Vec::new(),
            facets: [
                Facet::new(nj, nk),
                Facet::new(nj, nk),
                Facet::new(ni, nk),
                Facet::new(ni, nk),
                Facet::new(ni, nj),
                Facet::new(ni, nj),
            ],
        }
    }

    pub fn i_size(&self) -> usize {
        self.ni
    }
    pub fn j_size(&self) -> usize {
        self.nj
    }
    pub fn k_size(&self) -> usize {
        self.nk
    }

    pub fn cells_count(&self) -> usize {
        self.ni * self.nj * self.nk
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Allocate cell and node storage for this worker. Invariant (1) of §3:
    /// storage exists iff the owning rank is this worker's rank.
    pub fn allocate(&mut self) {
        self.active = true;
        self.cells = vec![
            Cell::new(Point3::default(), 0.0, [0.0; 6]);
            self.cells_count()
        ];
        self.nodes = vec![Point3::default(); (self.ni + 1) * (self.nj + 1) * (self.nk + 1)];
    }

    pub fn cell(&self, i: usize, j: usize, k: usize) -> &Cell {
        &self.cells[cell_index(i, j, k, self.ni, self.nj)]
    }

    pub fn cell_mut(&mut self, i: usize, j: usize, k: usize) -> &mut Cell {
        &mut self.cells[cell_index(i, j, k, self.ni, self.nj)]
    }

    pub fn node(&self, i: usize, j: usize, k: usize) -> &Point3 {
        &self.nodes[node_index(i, j, k, self.ni, self.nj)]
    }

    pub fn facet(&self, dir: FaceDirection) -> &Facet {
        &self.facets[dir.as_index()]
    }

    pub fn facet_mut(&mut self, dir: FaceDirection) -> &mut Facet {
        &mut self.facets[dir.as_index()]
    }

    /// Builds the reference Cartesian initial condition (§4.2): a uniform
    /// brick of extents `(lx, ly, lz)` with standard-atmosphere fluid state.
    pub fn init_solid_descartes(&mut self, lx: f64, ly: f64, lz: f64) {
        if !self.active {
            self.allocate();
        }
        let (ni, nj, nk) = (self.ni, self.nj, self.nk);
        let dx = lx / ni as f64;
        let dy = ly / nj as f64;
        let dz = lz / nk as f64;

        for k in 0..=nk {
            for j in 0..=nj {
                for i in 0..=ni {
                    let idx = node_index(i, j, k, ni, nj);
                    self.nodes[idx] = Point3::new(i as f64 * dx, j as f64 * dy, k as f64 * dz);
                }
            }
        }

        let areas = [dy * dz, dy * dz, dx * dz, dx * dz, dx * dy, dx * dy];
        let volume = dx * dy * dz;
        let atmosphere = FluidState::standard_atmosphere();

        for k in 0..nk {
            for j in 0..nj {
                for i in 0..ni {
                    let lo = *self.node(i, j, k);
                    let hi = *self.node(i + 1, j + 1, k + 1);
                    let idx = cell_index(i, j, k, ni, nj);
                    let mut cell = Cell::new(lo.midpoint(&hi), volume, areas);
                    cell.states[0] = atmosphere;
                    cell.states[1] = atmosphere;
                    self.cells[idx] = cell;
                }
            }
        }
    }

    pub fn copy_current_to_next(&mut self, cur: u8) {
        let nxt = cur ^ 1;
        for cell in self.cells.iter_mut() {
            cell.states[nxt as usize] = cell.states[cur as usize];
        }
    }

    pub fn convert_next_to_expanded(&mut self, nxt: u8) {
        for cell in self.cells.iter_mut() {
            cell.state_mut(nxt).normal_to_expanded();
        }
    }

    pub fn convert_next_to_normal(&mut self, nxt: u8) {
        for cell in self.cells.iter_mut() {
            cell.state_mut(nxt).expanded_to_normal();
        }
    }

    /// In-plane cell-index bounds of a node-coordinate patch, for the facet
    /// owned by `dir`. Used by the loader to bind an interface's patch onto
    /// this block's facet.
    pub fn facet_patch_bounds(
        dir: FaceDirection,
        i0: usize,
        i1: usize,
        j0: usize,
        j1: usize,
        k0: usize,
        k1: usize,
    ) -> (usize, usize, usize, usize) {
        let (u_axis, v_axis) = dir.in_plane_axes();
        let bounds = |axis: Axis| -> (usize, usize) {
            match axis {
                Axis::X => (i0, i1),
                Axis::Y => (j0, j1),
                Axis::Z => (k0, k1),
            }
        };
        let (u0, u1) = bounds(u_axis);
        let (v0, v1) = bounds(v_axis);
        (u0, u1, v0, v1)
    }
}
