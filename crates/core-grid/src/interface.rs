//! A rectangular patch connecting two blocks along a shared face.

use crate::direction::FaceDirection;
use crate::error::GridError;

/// Depth of the ghost halo, in cells (§6.3).
pub const SHADOW_DEPTH: usize = 3;
/// Scalars stored per halo cell: r, three velocity components, e, p, plus
/// three reserved slots (§6.3).
pub const PAYLOAD_PER_CELL: usize = 9;

/// One half of an interface pair: a node-coordinate patch on `src_block`'s
/// face `direction`, joined to `neighbor_block`.
#[derive(Debug, Clone)]
pub struct Interface {
    pub id: u32,
    pub src_block: usize,
    pub neighbor_block: usize,
    pub i0: usize,
    pub i1: usize,
    pub j0: usize,
    pub j1: usize,
    pub k0: usize,
    pub k1: usize,
    pub direction: FaceDirection,
    src_active: bool,
    neighbor_active: bool,
    halo: Vec<f64>,
}

impl Interface {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u32,
        src_block: usize,
        neighbor_block: usize,
        i0: usize,
        i1: usize,
        j0: usize,
        j1: usize,
        k0: usize,
        k1: usize,
        src_active: bool,
        neighbor_active: bool,
    ) -> Result<Self, GridError> {
        let direction = Self::derive_direction(i0, i1, j0, j1, k0, k1)?;
        let mut iface = Self {
            id,
            src_block,
            neighbor_block,
            i0,
            i1,
            j0,
            j1,
            k0,
            k1,
            direction,
            src_active,
            neighbor_active,
            halo: Vec::new(),
        };
        if iface.is_active() {
            iface.halo = vec![0.0; iface.buffer_len()];
        }
        Ok(iface)
    }

    /// Exactly one axis must be degenerate (§3). Returns the direction
    /// implied by that axis and whether its shared endpoint is zero (E6).
    fn derive_direction(
        i0: usize,
        i1: usize,
        j0: usize,
        j1: usize,
        k0: usize,
        k1: usize,
    ) -> Result<FaceDirection, GridError> {
        use crate::vector::Axis;
        let degenerate: Vec<(Axis, usize)> = [
            (Axis::X, i0, i1),
            (Axis::Y, j0, j1),
            (Axis::Z, k0, k1),
        ]
        .into_iter()
        .filter(|&(_, lo, hi)| lo == hi)
        .map(|(axis, lo, _)| (axis, lo))
        .collect();

        match degenerate.as_slice() {
            [(axis, at)] => Ok(FaceDirection::from_degenerate_axis(*axis, *at == 0)),
            _ => Err(GridError::InvariantViolation {
                reason: format!(
                    "interface patch must have exactly one degenerate axis, got {} ([{i0},{i1}] [{j0},{j1}] [{k0},{k1}])",
                    degenerate.len()
                ),
            }),
        }
    }

    pub fn is_src_active(&self) -> bool {
        self.src_active
    }

    pub fn is_neighbor_active(&self) -> bool {
        self.neighbor_active
    }

    pub fn is_active(&self) -> bool {
        self.src_active || self.neighbor_active
    }

    pub fn is_cross_rank(&self) -> bool {
        self.src_active ^ self.neighbor_active
    }

    /// Area of the patch, in cells.
    pub fn cells_count(&self) -> usize {
        let di = self.i1 - self.i0;
        let dj = self.j1 - self.j0;
        let dk = self.k1 - self.k0;
        if di == 0 {
            dj * dk
        } else if dj == 0 {
            di * dk
        } else {
            di * dj
        }
    }

    pub fn buffer_len(&self) -> usize {
        self.cells_count() * SHADOW_DEPTH * PAYLOAD_PER_CELL
    }

    pub fn halo(&self) -> &[f64] {
        &self.halo
    }

    pub fn halo_mut(&mut self) -> &mut [f64] {
        &mut self.halo
    }

    /// Self-test helper (§4.4): write `v` into every halo slot.
    pub fn fill_buffer(&mut self, v: f64) {
        self.halo.iter_mut().for_each(|slot| *slot = v);
    }

    /// Self-test helper (§4.4): every slot within `eps` of `v`.
    pub fn check_buffer(&self, v: f64, eps: f64) -> bool {
        self.halo.iter().all(|slot| (slot - v).abs() <= eps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_from_low_and_high_i_patch() {
        let lo = Interface::new(1, 0, 1, 0, 0, 0, 4, 0, 5, true, true).unwrap();
        assert_eq!(lo.direction, FaceDirection::IMinus);

        let hi = Interface::new(1, 0, 1, 10, 10, 0, 4, 0, 5, true, true).unwrap();
        assert_eq!(hi.direction, FaceDirection::IPlus);
    }

    #[test]
    fn rejects_non_degenerate_patch() {
        let bad = Interface::new(1, 0, 1, 0, 1, 0, 4, 0, 5, true, true);
        assert!(bad.is_err());
    }

    #[test]
    fn halo_size_matches_e5() {
        let iface = Interface::new(5, 0, 1, 0, 0, 0, 4, 0, 5, true, false).unwrap();
        assert_eq!(iface.cells_count(), 20);
        assert_eq!(iface.buffer_len(), 20 * SHADOW_DEPTH * PAYLOAD_PER_CELL);
        assert_eq!(iface.buffer_len(), 540);
        assert_eq!(iface.buffer_len() * 8, 4320);
    }

    #[test]
    fn fill_and_check_buffer_round_trip() {
        let mut iface = Interface::new(1, 0, 1, 0, 0, 0, 2, 0, 2, true, false).unwrap();
        iface.fill_buffer(1.0);
        assert!(iface.check_buffer(1.0, 1e-9));
        assert!(!iface.check_buffer(0.0, 1e-9));
    }

    #[test]
    fn inactive_interface_has_no_buffer() {
        let iface = Interface::new(1, 0, 1, 0, 0, 0, 2, 0, 2, false, false).unwrap();
        assert!(!iface.is_active());
        assert_eq!(iface.halo().len(), 0);
    }
}
