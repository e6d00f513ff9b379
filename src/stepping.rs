// Minimal host transport loop along the beam line
//
// Stands in for the host engine: asks every process for a step limit, moves
// the track by the shortest one, lets the limiting process (and any forced
// one) act, and stops when the track dies or leaves the world slab.

use crate::error::{Result, ScatterError};
use crate::particle::Track;
use crate::process::{DiscreteProcess, Step};
use crate::step_limit::ForceCondition;
use rand::RngCore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackFate {
    /// Left the world through one of its end planes
    Escaped,
    Killed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackOutcome {
    pub track: Track,
    pub fate: TrackFate,
    pub steps: u32,
    /// Number of process invocations, limiting or forced
    pub interactions: u32,
}

/// World is the slab |z| <= half_length; transverse extent is unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stepper {
    pub world_half_length: f64,
    pub max_steps: u32,
}

impl Stepper {
    pub fn new(world_half_length: f64) -> Self {
        Self {
            world_half_length,
            max_steps: 10_000,
        }
    }

    /// Distance along the track direction to the world boundary.
    fn distance_to_boundary(&self, track: &Track) -> f64 {
        let w = track.direction[2];
        let z = track.z();
        if w > 0.0 {
            ((self.world_half_length - z) / w).max(0.0)
        } else if w < 0.0 {
            ((-self.world_half_length - z) / w).max(0.0)
        } else {
            f64::INFINITY
        }
    }

    pub fn transport(
        &self,
        mut track: Track,
        processes: &mut [&mut dyn DiscreteProcess],
        rng: &mut dyn RngCore,
    ) -> Result<TrackOutcome> {
        for process in processes.iter_mut() {
            process.start_tracking(&track);
        }

        let mut steps = 0u32;
        let mut interactions = 0u32;

        loop {
            if steps >= self.max_steps {
                return Err(ScatterError::StepLimitExceeded { steps });
            }
            steps += 1;

            let proposals: Vec<_> = processes
                .iter()
                .map(|process| process.proposed_step_limit(&track))
                .collect();

            let (limiting, step_length) = proposals
                .iter()
                .enumerate()
                .map(|(i, p)| (Some(i), p.limit.length()))
                .fold((None, f64::INFINITY), |best, candidate| {
                    if candidate.1 < best.1 {
                        candidate
                    } else {
                        best
                    }
                });

            let boundary = self.distance_to_boundary(&track);
            if boundary <= step_length {
                track.move_by(boundary);
                return Ok(TrackOutcome {
                    track,
                    fate: TrackFate::Escaped,
                    steps,
                    interactions,
                });
            }

            let pre_position = track.position;
            track.move_by(step_length);
            let step = Step {
                length: step_length,
                pre_position,
                post_position: track.position,
            };

            for (i, process) in processes.iter_mut().enumerate() {
                let forced = proposals[i].condition == ForceCondition::Forced;
                if Some(i) != limiting && !forced {
                    continue;
                }
                interactions += 1;
                let change = process.fire(&track, &step, rng)?;
                change.apply_to(&mut track);
                if !track.is_alive() {
                    log::debug!(
                        "track {} killed by {} at z = {:.3} mm",
                        track.track_id,
                        process.name(),
                        track.z()
                    );
                    return Ok(TrackOutcome {
                        track,
                        fate: TrackFate::Killed,
                        steps,
                        interactions,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::fast_rng::FastRng;
    use crate::particle_change::ParticleChange;
    use crate::step_limit::{StepLimit, StepProposal};
    use crate::units::{CM, M};

    /// Process that never limits the step but insists on being called.
    struct Counter {
        calls: u32,
    }

    impl DiscreteProcess for Counter {
        fn name(&self) -> &str {
            "counter"
        }

        fn proposed_step_limit(&self, _track: &Track) -> StepProposal {
            StepProposal {
                limit: StepLimit::Unlimited,
                condition: ForceCondition::Forced,
            }
        }

        fn fire(&mut self, track: &Track, _step: &Step, _rng: &mut dyn RngCore) -> Result<ParticleChange> {
            self.calls += 1;
            Ok(ParticleChange::initialize(track))
        }
    }

    /// Process that keeps proposing the same short step forever.
    struct Stutter;

    impl DiscreteProcess for Stutter {
        fn name(&self) -> &str {
            "stutter"
        }

        fn proposed_step_limit(&self, _track: &Track) -> StepProposal {
            StepProposal {
                limit: StepLimit::Distance(0.0),
                condition: ForceCondition::NotForced,
            }
        }

        fn fire(&mut self, track: &Track, _step: &Step, _rng: &mut dyn RngCore) -> Result<ParticleChange> {
            Ok(ParticleChange::initialize(track))
        }
    }

    #[test]
    fn test_free_track_escapes_in_one_step() {
        let stepper = Stepper::new(1.5 * M);
        let mut rng = FastRng::new(1);
        let track = Track::primary([0.0, 0.0, -30.0 * CM], 100.0, 0.511);
        let mut none: [&mut dyn DiscreteProcess; 0] = [];
        let outcome = stepper.transport(track, &mut none, &mut rng).unwrap();
        assert_eq!(outcome.fate, TrackFate::Escaped);
        assert_eq!(outcome.steps, 1);
        assert!((outcome.track.z() - 1.5 * M).abs() < 1e-9);
    }

    #[test]
    fn test_forced_process_is_invoked_every_step() {
        let stepper = Stepper {
            max_steps: 5,
            ..Stepper::new(1.0 * M)
        };
        let mut rng = FastRng::new(1);
        let mut counter = Counter { calls: 0 };
        let mut stutter = Stutter;

        let track = Track::primary([0.0, 0.0, 0.0], 100.0, 0.511);
        let mut processes: [&mut dyn DiscreteProcess; 2] = [&mut counter, &mut stutter];
        let result = stepper.transport(track, &mut processes, &mut rng);
        assert!(matches!(result, Err(ScatterError::StepLimitExceeded { steps: 5 })));
        assert_eq!(counter.calls, 5);
    }
}
