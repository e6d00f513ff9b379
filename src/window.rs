// Angular and momentum-transfer window sampling for the hard vertex

use crate::units::PROTON_MASS;
use rand::Rng;

/// One (θ, φ, Q²) draw. Angles in rad, Q² in MeV².
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicWindow {
    pub theta: f64,
    pub phi: f64,
    pub q2: f64,
}

impl KinematicWindow {
    pub fn one_minus_cos_theta(&self) -> f64 {
        1.0 - self.theta.cos()
    }

    /// Lab direction of the scattered particle, beam along +z.
    pub fn direction(&self) -> [f64; 3] {
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        [sin_theta * cos_phi, sin_theta * sin_phi, cos_theta]
    }
}

/// Largest Q² reachable at angle `theta` by a particle of total energy
/// `energy` scattering elastically off a nucleon at rest.
pub fn q2_max(theta: f64, energy: f64) -> f64 {
    (2.0 * PROTON_MASS * energy) / (1.0 + PROTON_MASS / (energy * (1.0 - theta.cos())))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicWindowSampler {
    pub theta_central: f64,
    pub theta_half_window: f64,
    pub phi_center: f64,
    pub phi_half_window: f64,
}

impl KinematicWindowSampler {
    /// Range of cos θ covered by the polar window, as (low, high).
    pub fn cos_theta_range(&self) -> (f64, f64) {
        (
            (self.theta_central + self.theta_half_window).cos(),
            (self.theta_central - self.theta_half_window).cos(),
        )
    }

    pub fn phi_range(&self) -> (f64, f64) {
        (self.phi_center - self.phi_half_window, self.phi_center + self.phi_half_window)
    }

    /// Draw θ uniform in solid angle, then φ, then Q² up to the
    /// kinematic limit for `total_energy`. Exactly three uniforms are used.
    pub fn sample<R: Rng + ?Sized>(&self, total_energy: f64, rng: &mut R) -> KinematicWindow {
        let (cos_lo, cos_hi) = self.cos_theta_range();
        let theta = flat(cos_lo, cos_hi, rng).acos();

        let (phi_lo, phi_hi) = self.phi_range();
        let phi = flat(phi_lo, phi_hi, rng);

        let q2 = flat(0.0, q2_max(theta, total_energy), rng);

        KinematicWindow { theta, phi, q2 }
    }
}

fn flat<R: Rng + ?Sized>(lo: f64, hi: f64, rng: &mut R) -> f64 {
    lo + (hi - lo) * rng.gen::<f64>()
}
