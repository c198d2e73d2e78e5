//! Per-cell conserved variables and the normal/expanded form conversion.

use crate::vector::{Axis, Vector3};

/// Ideal-gas ratio of specific heats used by every closure in this crate.
pub const GAMMA: f64 = 1.4;

/// Five scalars describing the fluid state in a cell: density, velocity,
/// internal energy and pressure, plus the implicit ideal-gas `GAMMA`.
///
/// Two algebraic forms share this representation (§3):
/// - **Normal form**: `v` is velocity, `e` is specific internal energy per unit mass.
/// - **Expanded form**: `v` is momentum per volume (`rho * v`), `e` is total
///   energy per volume (`rho * (e + |v|^2 / 2)`).
///
/// The conversions are exact inverses up to the pressure re-derivation from
/// the ideal-gas closure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidState {
    pub r: f64,
    pub v: Vector3,
    pub e: f64,
    pub p: f64,
}

impl FluidState {
    pub fn new(r: f64, v: Vector3, e: f64, p: f64) -> Self {
        Self { r, v, e, p }
    }

    /// The standard-atmosphere reference initial condition (§4.2).
    pub fn standard_atmosphere() -> Self {
        let r = 1.225;
        let p = 101_325.0;
        let e = p / ((GAMMA - 1.0) * r);
        Self { r, v: Vector3::ZERO, e, p }
    }

    pub fn pressure_from_closure(r: f64, e: f64) -> f64 {
        (GAMMA - 1.0) * r * e
    }

    pub fn energy_from_closure(r: f64, p: f64) -> f64 {
        p / ((GAMMA - 1.0) * r)
    }

    /// Normal -> expanded, in place. `v` becomes momentum per volume, `e`
    /// becomes total energy per volume.
    pub fn normal_to_expanded(&mut self) {
        let speed_sq = self.v.length_sq();
        self.e = self.r * (self.e + 0.5 * speed_sq);
        self.v = self.v * self.r;
    }

    /// Expanded -> normal, in place. The inverse of [`Self::normal_to_expanded`];
    /// pressure is re-derived from the ideal-gas closure afterwards, so the
    /// round trip is exact only up to that consistency (§8 invariant 4).
    pub fn expanded_to_normal(&mut self) {
        self.v = self.v * (1.0 / self.r);
        let speed_sq = self.v.length_sq();
        self.e = self.e / self.r - 0.5 * speed_sq;
        self.p = Self::pressure_from_closure(self.r, self.e);
    }

    /// Mirror the velocity component normal to a reflecting wall.
    pub fn mirrored(&self, axis: Axis) -> FluidState {
        let mut mirrored = *self;
        *mirrored.v.component_mut(axis) *= -1.0;
        mirrored
    }

    /// Mass flux density `rho * V_a` along `axis`, in expanded form.
    pub fn mass_flux(&self, axis: Axis) -> f64 {
        self.r * self.v.component(axis)
    }

    /// Momentum flux `rho * V_a^2 + P` along `axis`, in expanded form.
    pub fn momentum_flux(&self, axis: Axis) -> f64 {
        self.r * self.v.component(axis).powi(2) + self.p
    }

    /// Energy flux `V_a * (E + P)` along `axis`, in expanded form (`E` is
    /// already the total energy per volume here).
    pub fn energy_flux(&self, axis: Axis) -> f64 {
        self.v.component(axis) * (self.e + self.p)
    }

    /// Accumulate a flux contribution (`dr`, `dv` along `axis`, `de`) into
    /// this expanded-form state. Mirrors the source's `Flow_X`/`Flow_Y`/`Flow_Z`.
    pub fn apply_flux(&mut self, axis: Axis, dr: f64, dv: f64, de: f64) {
        self.r += dr;
        *self.v.component_mut(axis) += dv;
        self.e += de;
    }
}

impl Default for FluidState {
    fn default() -> Self {
        FluidState::new(0.0, Vector3::ZERO, 0.0, 0.0)
    }
}
