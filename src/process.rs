// Forced hard scattering with radiation on both sides of the vertex

use crate::config::{FiringPolicy, ScatteringConfig};
use crate::error::{Result, ScatterError};
use crate::particle::{Track, TrackStatus};
use crate::particle_change::ParticleChange;
use crate::radiative::RadiativeLossSampler;
use crate::solver::{KinematicsSolver, SolverOutcome, VertexKinematics};
use crate::step_limit::{StepLimiter, StepProposal};
use crate::window::{KinematicWindow, KinematicWindowSampler};
use rand::{Rng, RngCore};

/// Geometry of the step that ended in the interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub length: f64,
    pub pre_position: [f64; 3],
    pub post_position: [f64; 3],
}

/// What a host needs from a discrete interaction.
pub trait DiscreteProcess {
    fn name(&self) -> &str;

    /// Called once before the host starts moving `track`.
    fn start_tracking(&mut self, _track: &Track) {}

    fn proposed_step_limit(&self, track: &Track) -> StepProposal;

    /// Run the interaction at the end of `step` and describe how the track
    /// changes.
    fn fire(&mut self, track: &Track, step: &Step, rng: &mut dyn RngCore) -> Result<ParticleChange>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScatterState {
    Idle,
    Fired,
}

/// Everything sampled for one successful firing. Energies in MeV.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampledKinematics {
    pub incident_total_energy: f64,
    pub incident_kinetic_energy: f64,
    pub window: KinematicWindow,
    pub vertex: VertexKinematics,
    pub post_loss: f64,
    /// Final energy after post-vertex radiation
    pub post_energy: f64,
    pub direction: [f64; 3],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FireOutcome {
    Scattered(SampledKinematics),
    /// Kinematics converged but the outgoing total energy does not exceed
    /// the rest mass; the track is killed.
    BelowRestMass(SampledKinematics),
    /// The solver ran out of attempts; the track is killed.
    NonConvergent {
        incident_total_energy: f64,
        window: KinematicWindow,
        attempts: u32,
    },
}

impl FireOutcome {
    pub fn kinematics(&self) -> Option<&SampledKinematics> {
        match self {
            FireOutcome::Scattered(k) | FireOutcome::BelowRestMass(k) => Some(k),
            FireOutcome::NonConvergent { .. } => None,
        }
    }
}

pub struct ScatteringProcess {
    name: String,
    config: ScatteringConfig,
    state: ScatterState,
    last_outcome: Option<FireOutcome>,
}

impl ScatteringProcess {
    pub fn new(config: ScatteringConfig) -> Result<Self> {
        Self::with_name("rcScattering", config)
    }

    pub fn with_name(name: &str, config: ScatteringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            name: name.to_string(),
            config,
            state: ScatterState::Idle,
            last_outcome: None,
        })
    }

    pub fn config(&self) -> &ScatteringConfig {
        &self.config
    }

    pub fn state(&self) -> ScatterState {
        self.state
    }

    /// Outcome of the most recent firing, if any.
    pub fn last_outcome(&self) -> Option<&FireOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn set_config(&mut self, config: ScatteringConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn set_vertex_z(&mut self, z: f64) -> Result<()> {
        self.update(|c| c.vertex_z = z)
    }

    pub fn set_photon_cutoff(&mut self, cutoff: f64) -> Result<()> {
        self.update(|c| c.photon_cutoff = cutoff)
    }

    pub fn set_central_scattering_angle(&mut self, theta: f64) -> Result<()> {
        self.update(|c| c.theta_central = theta)
    }

    pub fn set_theta_half_window(&mut self, half_window: f64) -> Result<()> {
        self.update(|c| c.theta_half_window = half_window)
    }

    pub fn set_phi_window(&mut self, center: f64, half_window: f64) -> Result<()> {
        self.update(|c| {
            c.phi_center = center;
            c.phi_half_window = half_window;
        })
    }

    pub fn set_firing_policy(&mut self, policy: FiringPolicy) -> Result<()> {
        self.update(|c| c.firing_policy = policy)
    }

    fn update<F: FnOnce(&mut ScatteringConfig)>(&mut self, edit: F) -> Result<()> {
        let mut config = self.config.clone();
        edit(&mut config);
        self.set_config(config)
    }

    pub fn step_limiter(&self) -> StepLimiter {
        StepLimiter::new(self.config.vertex_z)
    }

    pub fn window_sampler(&self) -> KinematicWindowSampler {
        KinematicWindowSampler {
            theta_central: self.config.theta_central,
            theta_half_window: self.config.theta_half_window,
            phi_center: self.config.phi_center,
            phi_half_window: self.config.phi_half_window,
        }
    }

    pub fn solver(&self) -> KinematicsSolver {
        KinematicsSolver::new(
            RadiativeLossSampler::new(self.config.photon_cutoff),
            self.config.max_solver_attempts,
        )
    }

    /// Sample one interaction for a particle with the given energies,
    /// without touching the firing state.
    ///
    /// Draw order: θ, φ, Q², the solver's pre-vertex losses, then the
    /// post-vertex loss. The post-vertex loss is drawn even when the solver
    /// gives up, from the last rejected attempt, and then discarded.
    pub fn sample_kinematics<R: Rng + ?Sized>(
        &self,
        total_energy: f64,
        kinetic_energy: f64,
        rng: &mut R,
    ) -> Result<FireOutcome> {
        if !(kinetic_energy > 0.0 && kinetic_energy.is_finite()) {
            return Err(ScatterError::InvalidIncidentEnergy {
                kinetic: kinetic_energy,
            });
        }

        let window = self.window_sampler().sample(total_energy, rng);
        let solver = self.solver();

        let outcome = solver.solve(&window, total_energy, kinetic_energy, rng);
        let (pre_loss, nu) = match &outcome {
            SolverOutcome::Converged(vertex) => (vertex.pre_loss, vertex.nu),
            SolverOutcome::Exhausted { pre_loss, nu, .. } => (*pre_loss, *nu),
        };
        let reduced_kinetic = kinetic_energy - pre_loss - nu;
        let post_loss = solver.radiator.sample(window.q2, reduced_kinetic, rng);

        let vertex = match outcome {
            SolverOutcome::Converged(vertex) => vertex,
            SolverOutcome::Exhausted { attempts, .. } => {
                return Ok(FireOutcome::NonConvergent {
                    incident_total_energy: total_energy,
                    window,
                    attempts,
                });
            }
        };

        let kinematics = SampledKinematics {
            incident_total_energy: total_energy,
            incident_kinetic_energy: kinetic_energy,
            window,
            vertex,
            post_loss,
            post_energy: vertex.ef - post_loss,
            direction: window.direction(),
        };
        let mass = total_energy - kinetic_energy;
        if kinematics.post_energy <= mass {
            return Ok(FireOutcome::BelowRestMass(kinematics));
        }
        Ok(FireOutcome::Scattered(kinematics))
    }
}

impl DiscreteProcess for ScatteringProcess {
    fn name(&self) -> &str {
        &self.name
    }

    fn start_tracking(&mut self, _track: &Track) {
        if self.config.firing_policy == FiringPolicy::OncePerTrack {
            self.state = ScatterState::Idle;
        }
    }

    fn proposed_step_limit(&self, track: &Track) -> StepProposal {
        self.step_limiter().propose(track)
    }

    fn fire(&mut self, track: &Track, _step: &Step, rng: &mut dyn RngCore) -> Result<ParticleChange> {
        let mut change = ParticleChange::initialize(track);
        if self.state == ScatterState::Fired {
            return Ok(change);
        }

        let outcome = self.sample_kinematics(track.total_energy(), track.kinetic_energy, rng)?;
        match &outcome {
            FireOutcome::Scattered(k) => {
                log::debug!(
                    "{}: track {} scattered at theta = {:.4} rad, phi = {:.4} rad, Q2 = {:.1} MeV^2, E = {:.3} -> {:.3} MeV",
                    self.name,
                    track.track_id,
                    k.window.theta,
                    k.window.phi,
                    k.window.q2,
                    k.incident_total_energy,
                    k.post_energy
                );
                change.propose_energy(k.post_energy);
                change.propose_direction(k.direction);
            }
            FireOutcome::BelowRestMass(k) => {
                log::warn!(
                    "{}: outgoing energy {:.3} MeV does not exceed the rest mass {:.3} MeV, killing track {}",
                    self.name,
                    k.post_energy,
                    track.mass,
                    track.track_id
                );
                change.propose_status(TrackStatus::StopAndKill);
            }
            FireOutcome::NonConvergent { window, attempts, .. } => {
                log::warn!(
                    "{}: no consistent kinematics after {} attempts (theta = {:.4} rad, Q2 = {:.1} MeV^2), killing track {}",
                    self.name,
                    attempts,
                    window.theta,
                    window.q2,
                    track.track_id
                );
                change.propose_status(TrackStatus::StopAndKill);
            }
        }

        self.state = ScatterState::Fired;
        self.last_outcome = Some(outcome);
        Ok(change)
    }
}
