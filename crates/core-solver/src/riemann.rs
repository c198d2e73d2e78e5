//! Pluggable Riemann averager (§4.6 "Riemann averager"). The stepper calls
//! this for every face to obtain a centered state; it never needs to know
//! which solver produced it.

use core_grid::FluidState;

pub trait RiemannSolver {
    /// Centered state between `left` and `right`, both in normal form.
    fn center(&self, left: &FluidState, right: &FluidState) -> FluidState;
}

/// The baseline solver: arithmetic mean of each scalar and each velocity
/// component independently.
///
/// `original_source/Hydro/src/Solver/Riemann.cpp`'s `Avg` assigns
/// `center.V.X` three times instead of averaging `V.Y` and `V.Z`
/// separately; this implementation averages each component on its own axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct AverageRiemann;

impl RiemannSolver for AverageRiemann {
    fn center(&self, left: &FluidState, right: &FluidState) -> FluidState {
        FluidState::new(
            0.5 * (left.r + right.r),
            core_grid::Vector3::new(
                0.5 * (left.v.x + right.v.x),
                0.5 * (left.v.y + right.v.y),
                0.5 * (left.v.z + right.v.z),
            ),
            0.5 * (left.e + right.e),
            0.5 * (left.p + right.p),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_grid::Vector3;

    #[test]
    fn averages_each_component_independently() {
        let left = FluidState::new(1.0, Vector3::new(2.0, 4.0, 6.0), 10.0, 100.0);
        let right = FluidState::new(3.0, Vector3::new(8.0, 0.0, 2.0), 20.0, 200.0);
        let center = AverageRiemann.center(&left, &right);
        assert_eq!(center.r, 2.0);
        assert_eq!(center.v, Vector3::new(5.0, 2.0, 4.0));
        assert_eq!(center.e, 15.0);
        assert_eq!(center.p, 150.0);
    }

    #[test]
    fn uniform_state_averages_to_itself() {
        let s = FluidState::new(1.225, Vector3::ZERO, 2.0e5, 101_325.0);
        let center = AverageRiemann.center(&s, &s);
        assert_eq!(center, s);
    }
}
