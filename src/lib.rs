//! Forced hard scattering of a charged primary with internal radiative
//! corrections on both sides of the vertex.
//!
//! The [`ScatteringProcess`] steers the primary to a fixed vertex along the
//! beam axis, samples (θ, φ, Q²), solves for the pre-vertex radiation and
//! energy transfer, radiates once more after the vertex and proposes the
//! outgoing energy and direction to the host.

pub mod config;
pub mod error;
pub mod fast_rng;
pub mod particle;
pub mod particle_change;
pub mod process;
pub mod radiative;
pub mod solver;
pub mod step_limit;
pub mod stepping;
pub mod target;
pub mod units;
pub mod window;

pub use config::{FiringPolicy, ScatteringConfig};
pub use error::{Result, ScatterError};
pub use fast_rng::FastRng;
pub use particle::{Track, TrackStatus};
pub use particle_change::ParticleChange;
pub use process::{DiscreteProcess, FireOutcome, SampledKinematics, ScatterState, ScatteringProcess, Step};
pub use radiative::RadiativeLossSampler;
pub use solver::{KinematicsSolver, SolverOutcome, VertexKinematics};
pub use step_limit::{ForceCondition, StepLimit, StepLimiter, StepProposal};
pub use stepping::{Stepper, TrackFate, TrackOutcome};
pub use target::{TargetCell, TargetGas};
pub use window::{q2_max, KinematicWindow, KinematicWindowSampler};
