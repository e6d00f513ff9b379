// Configuration for the forced scattering process
use crate::error::{Result, ScatterError};
use crate::solver::DEFAULT_MAX_ATTEMPTS;
use crate::target::{TargetCell, TargetGas};
use crate::units::{CM, DEG, MEV};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::path::Path;

/// How long a firing lasts before the process can fire again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FiringPolicy {
    /// Fire once for the lifetime of the process instance. Every later
    /// track passes through untouched.
    #[default]
    OncePerRun,
    /// Re-arm whenever the host starts tracking a new track.
    OncePerTrack,
}

/// Settings of a [`ScatteringProcess`](crate::ScatteringProcess).
///
/// All quantities are in internal units (mm, MeV, rad). Missing JSON
/// fields fall back to the Hall A style defaults: vertex at 7.5 cm, 1 MeV
/// photon cutoff, 17.5 deg central angle with a ±5 deg polar and ±10 deg
/// azimuthal window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatteringConfig {
    pub vertex_z: f64,
    pub photon_cutoff: f64,
    pub theta_central: f64,
    pub theta_half_window: f64,
    pub phi_center: f64,
    pub phi_half_window: f64,
    pub max_solver_attempts: u32,
    pub firing_policy: FiringPolicy,
    /// When set, the vertex must lie inside this target cell.
    pub target: Option<TargetGas>,
}

impl Default for ScatteringConfig {
    fn default() -> Self {
        ScatteringConfig {
            vertex_z: 7.5 * CM,
            photon_cutoff: 1.0 * MEV,
            theta_central: 17.5 * DEG,
            theta_half_window: 5.0 * DEG,
            phi_center: 0.0,
            phi_half_window: 10.0 * DEG,
            max_solver_attempts: DEFAULT_MAX_ATTEMPTS,
            firing_policy: FiringPolicy::OncePerRun,
            target: None,
        }
    }
}

impl ScatteringConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ScatteringConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the settings describe a physical scattering window.
    pub fn validate(&self) -> Result<()> {
        if !self.vertex_z.is_finite() {
            return Err(invalid(format!("vertex position {} is not finite", self.vertex_z)));
        }
        if !(self.photon_cutoff > 0.0 && self.photon_cutoff.is_finite()) {
            return Err(invalid(format!(
                "photon cutoff {} MeV must be positive",
                self.photon_cutoff
            )));
        }
        if !(self.theta_half_window >= 0.0) {
            return Err(invalid(format!(
                "polar half window {} rad must be non-negative",
                self.theta_half_window
            )));
        }
        let theta_lo = self.theta_central - self.theta_half_window;
        let theta_hi = self.theta_central + self.theta_half_window;
        // θ = 0 leaves no momentum transfer, θ = π folds the window back
        if !(theta_lo > 0.0 && theta_hi < PI) {
            return Err(invalid(format!(
                "polar window [{:.4}, {:.4}] rad must lie strictly inside (0, pi)",
                theta_lo, theta_hi
            )));
        }
        if !(self.phi_half_window >= 0.0 && self.phi_half_window <= PI) || !self.phi_center.is_finite() {
            return Err(invalid(format!(
                "azimuthal window {} ± {} rad is not a valid range",
                self.phi_center, self.phi_half_window
            )));
        }
        if self.max_solver_attempts == 0 {
            return Err(invalid("solver needs at least one attempt".to_string()));
        }
        if let Some(gas) = self.target {
            let cell = TargetCell::new(gas);
            if !cell.contains_vertex(self.vertex_z) {
                let (lo, hi) = cell.outer_extent();
                return Err(invalid(format!(
                    "vertex z = {} mm lies outside the {} cell [{}, {}] mm",
                    self.vertex_z, gas, lo, hi
                )));
            }
            if cell.vertex_in_window(self.vertex_z) {
                log::warn!(
                    "vertex z = {} mm lies in an end window of the {} cell, not in the gas",
                    self.vertex_z,
                    gas
                );
            }
        }
        Ok(())
    }
}

fn invalid(message: String) -> ScatterError {
    ScatterError::InvalidConfiguration(message)
}
