//! Data model for a distributed multi-block structured-grid CFD engine:
//! blocks, interfaces, facets, the per-cell fluid state, and the grid
//! registry that owns them (§3 of the design).

pub mod block;
pub mod cell;
pub mod direction;
pub mod error;
pub mod facet;
pub mod fluid;
pub mod grid;
pub mod interface;
pub mod timer;
pub mod vector;

pub use block::Block;
pub use cell::Cell;
pub use direction::FaceDirection;
pub use error::GridError;
pub use facet::{Border, BoundaryKind, Facet};
pub use fluid::{FluidState, GAMMA};
pub use grid::Grid;
pub use interface::{Interface, PAYLOAD_PER_CELL, SHADOW_DEPTH};
pub use timer::Timer;
pub use vector::{Axis, Point3, Vector3};
