//! The closed enumeration of the six block face directions, and the lookup
//! table that replaces the source's per-axis `Facet_I`/`Facet_J`/`Facet_K`
//! subclasses (§9, "Virtual Facet hierarchy").

use crate::vector::Axis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceDirection {
    IMinus,
    IPlus,
    JMinus,
    JPlus,
    KMinus,
    KPlus,
}

impl FaceDirection {
    pub const ALL: [FaceDirection; 6] = [
        FaceDirection::IMinus,
        FaceDirection::IPlus,
        FaceDirection::JMinus,
        FaceDirection::JPlus,
        FaceDirection::KMinus,
        FaceDirection::KPlus,
    ];

    /// Index into the per-cell six-entry area array and the block's six facets.
    pub fn as_index(self) -> usize {
        match self {
            FaceDirection::IMinus => 0,
            FaceDirection::IPlus => 1,
            FaceDirection::JMinus => 2,
            FaceDirection::JPlus => 3,
            FaceDirection::KMinus => 4,
            FaceDirection::KPlus => 5,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            FaceDirection::IMinus | FaceDirection::IPlus => Axis::X,
            FaceDirection::JMinus | FaceDirection::JPlus => Axis::Y,
            FaceDirection::KMinus | FaceDirection::KPlus => Axis::Z,
        }
    }

    pub fn is_low(self) -> bool {
        matches!(
            self,
            FaceDirection::IMinus | FaceDirection::JMinus | FaceDirection::KMinus
        )
    }

    /// The two in-plane axes of the facet owned by this direction, in
    /// (height-axis, width-axis) order. This small table is what the source's
    /// three Facet subclasses existed only to encode.
    pub fn in_plane_axes(self) -> (Axis, Axis) {
        match self {
            FaceDirection::IMinus | FaceDirection::IPlus => (Axis::Y, Axis::Z),
            FaceDirection::JMinus | FaceDirection::JPlus => (Axis::X, Axis::Z),
            FaceDirection::KMinus | FaceDirection::KPlus => (Axis::X, Axis::Y),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FaceDirection::IMinus => "I-",
            FaceDirection::IPlus => "I+",
            FaceDirection::JMinus => "J-",
            FaceDirection::JPlus => "J+",
            FaceDirection::KMinus => "K-",
            FaceDirection::KPlus => "K+",
        }
    }

    /// Derive a direction from a degenerate node-coordinate axis (the axis on
    /// which the two endpoints are equal) and whether that endpoint is zero.
    pub fn from_degenerate_axis(axis: Axis, at_zero: bool) -> FaceDirection {
        match (axis, at_zero) {
            (Axis::X, true) => FaceDirection::IMinus,
            (Axis::X, false) => FaceDirection::IPlus,
            (Axis::Y, true) => FaceDirection::JMinus,
            (Axis::Y, false) => FaceDirection::JPlus,
            (Axis::Z, true) => FaceDirection::KMinus,
            (Axis::Z, false) => FaceDirection::KPlus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_plane_axes_cover_all_six() {
        for dir in FaceDirection::ALL {
            let (a, b) = dir.in_plane_axes();
            assert_ne!(a, b, "axes must differ");
        }
    }

    #[test]
    fn derive_direction_matches_e6() {
        assert_eq!(
            FaceDirection::from_degenerate_axis(Axis::X, true),
            FaceDirection::IMinus
        );
        assert_eq!(
            FaceDirection::from_degenerate_axis(Axis::X, false),
            FaceDirection::IPlus
        );
    }
}
