// Internal bremsstrahlung energy loss in the equivalent radiator approximation

use crate::units::{ALPHA, ELECTRON_MASS, EULER_GAMMA};
use rand::Rng;
use std::f64::consts::PI;

/// Samples the energy carried off by unresolved internal bremsstrahlung.
///
/// The soft photon spectrum of a scattering with momentum transfer Q² is
/// replaced by that of a radiator of thickness `bt` (Mo and Tsai). Photons
/// below `cutoff` are never emitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiativeLossSampler {
    cutoff: f64,
}

impl RadiativeLossSampler {
    pub fn new(cutoff: f64) -> Self {
        Self { cutoff }
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Equivalent radiator thickness `bt` for momentum transfer `q2`.
    pub fn equivalent_radiator(q2: f64) -> f64 {
        (ALPHA / PI) * ((q2 / (ELECTRON_MASS * ELECTRON_MASS)).ln() - 1.0)
    }

    /// Probability of radiating any photon above the cutoff.
    ///
    /// Returns 0 when there is no phase space: `energy` at or below the
    /// cutoff, or `q2` too small for a positive radiator thickness.
    pub fn radiation_probability(&self, q2: f64, energy: f64) -> f64 {
        let bt = Self::equivalent_radiator(q2);
        if !Self::can_radiate(bt, energy, self.cutoff) {
            return 0.0;
        }
        let eps = self.cutoff / energy;
        let spectrum = 1.0 - eps.powf(bt) - (bt / (bt + 1.0)) * (1.0 - eps.powf(bt + 1.0))
            + 0.75 * (bt / (bt + 2.0)) * (1.0 - eps.powf(bt + 2.0));
        let norm = 1.0 - bt * EULER_GAMMA + (bt * bt / 12.0) * (6.0 * EULER_GAMMA * EULER_GAMMA + PI * PI);
        spectrum / norm
    }

    /// Draw the radiated energy for a particle of energy `energy`.
    ///
    /// Consumes one uniform to decide whether anything is radiated, then two
    /// per rejection round. The result lies in [0, energy).
    pub fn sample<R: Rng + ?Sized>(&self, q2: f64, energy: f64, rng: &mut R) -> f64 {
        let prob = self.radiation_probability(q2, energy);
        let prob_sample: f64 = rng.gen();
        if prob <= 0.0 || prob_sample > prob {
            return 0.0;
        }

        let bt = Self::equivalent_radiator(q2);
        loop {
            // log-uniform proposal between the cutoff and the full energy
            let eloss = self.cutoff * (energy / self.cutoff).powf(rng.gen::<f64>());
            let x = eloss / energy;
            let envelope = 1.0 / eloss;
            let value = (1.0 / eloss) * x.powf(bt) * (1.0 - x + 0.75 * x * x);

            if rng.gen::<f64>() <= value / envelope {
                return eloss;
            }
        }
    }

    fn can_radiate(bt: f64, energy: f64, cutoff: f64) -> bool {
        bt > 0.0 && bt.is_finite() && energy.is_finite() && energy > cutoff
    }
}
