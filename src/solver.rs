// Pre-vertex radiation and energy transfer, solved by bounded redraws

use crate::radiative::RadiativeLossSampler;
use crate::units::PROTON_MASS;
use crate::window::KinematicWindow;
use rand::Rng;

/// Redraw budget used when nothing else is configured.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Energies at the hard vertex for an accepted draw (MeV).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexKinematics {
    /// Energy radiated before the vertex
    pub pre_loss: f64,
    /// Incident energy at the vertex
    pub e0: f64,
    /// Scattered energy before post-vertex radiation
    pub ef: f64,
    /// Energy transfer to the recoil system
    pub nu: f64,
    pub attempts: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolverOutcome {
    Converged(VertexKinematics),
    /// Every attempt was rejected. `pre_loss` and `nu` are those of the last
    /// rejected attempt (both zero when the budget is zero).
    Exhausted { attempts: u32, pre_loss: f64, nu: f64 },
}

impl SolverOutcome {
    pub fn converged(&self) -> Option<&VertexKinematics> {
        match self {
            SolverOutcome::Converged(vertex) => Some(vertex),
            SolverOutcome::Exhausted { .. } => None,
        }
    }
}

/// Relative slack, in units of the vertex energy, under which a transfer just
/// below `nu_min` still counts as the elastic edge.
pub const ROUNDING_TOLERANCE: f64 = 16.0 * f64::EPSILON;

/// Lowest energy transfer compatible with `q2` on a nucleon at rest.
pub fn nu_min(q2: f64) -> f64 {
    q2 / (2.0 * PROTON_MASS)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicsSolver {
    pub radiator: RadiativeLossSampler,
    pub max_attempts: u32,
}

impl KinematicsSolver {
    pub fn new(radiator: RadiativeLossSampler, max_attempts: u32) -> Self {
        Self { radiator, max_attempts }
    }

    /// Search for a pre-vertex loss that leaves enough energy to transfer
    /// at least `nu_min(q2)` at the sampled angle.
    ///
    /// Radiation is drawn from the kinetic energy, energies at the vertex
    /// are computed from the total energy.
    pub fn solve<R: Rng + ?Sized>(
        &self,
        window: &KinematicWindow,
        total_energy: f64,
        kinetic_energy: f64,
        rng: &mut R,
    ) -> SolverOutcome {
        let one_minus_cos = window.one_minus_cos_theta();
        let threshold = nu_min(window.q2);
        let mut last = (0.0, 0.0);

        for attempt in 1..=self.max_attempts {
            let pre_loss = self.radiator.sample(window.q2, kinetic_energy, rng);
            let e0 = total_energy - pre_loss;
            let ef = window.q2 / (2.0 * e0 * one_minus_cos);
            let nu = e0 - ef;

            if nu >= threshold - ROUNDING_TOLERANCE * e0 {
                // Q² at Q²max lands on the elastic edge only up to rounding
                let (ef, nu) = if nu < threshold {
                    (e0 - threshold, threshold)
                } else {
                    (ef, nu)
                };
                return SolverOutcome::Converged(VertexKinematics {
                    pre_loss,
                    e0,
                    ef,
                    nu,
                    attempts: attempt,
                });
            }
            log::trace!(
                "solver attempt {} rejected: nu = {:.4} MeV below {:.4} MeV",
                attempt,
                nu,
                threshold
            );
            last = (pre_loss, nu);
        }

        SolverOutcome::Exhausted {
            attempts: self.max_attempts,
            pre_loss: last.0,
            nu: last.1,
        }
    }
}
