// Internal unit system and physical constants
//
// Quantities are stored as plain f64 in the host transport convention:
// lengths in mm, energies in MeV, angles in rad. Multiply by a unit to
// convert into internal units, divide to convert out.

pub const MM: f64 = 1.0;
pub const CM: f64 = 10.0 * MM;
pub const M: f64 = 1000.0 * MM;

pub const KEV: f64 = 1.0e-3;
pub const MEV: f64 = 1.0;
pub const GEV: f64 = 1.0e3;

pub const RAD: f64 = 1.0;
pub const DEG: f64 = std::f64::consts::PI / 180.0;

/// Proton rest mass, used as the struck nucleon mass.
pub const PROTON_MASS: f64 = 0.938272 * GEV;

/// Electron rest mass.
pub const ELECTRON_MASS: f64 = 0.510998910 * MEV;

/// Fine-structure constant as used by the equivalent radiator formula.
pub const ALPHA: f64 = 1.0 / 137.0;

/// Euler-Mascheroni constant.
pub const EULER_GAMMA: f64 = 0.5772157;
