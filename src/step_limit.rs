use crate::particle::Track;

/// Largest step a process is willing to let the host take.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepLimit {
    Distance(f64),
    Unlimited,
}

impl StepLimit {
    pub fn length(&self) -> f64 {
        match self {
            StepLimit::Distance(d) => *d,
            StepLimit::Unlimited => f64::INFINITY,
        }
    }

    pub fn is_limited(&self) -> bool {
        matches!(self, StepLimit::Distance(_))
    }
}

/// Whether the host must invoke the process even when another process
/// limited the step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceCondition {
    NotForced,
    Forced,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepProposal {
    pub limit: StepLimit,
    pub condition: ForceCondition,
}

/// Steers the primary onto the interaction vertex along the beam axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepLimiter {
    pub vertex_z: f64,
}

impl StepLimiter {
    pub fn new(vertex_z: f64) -> Self {
        Self { vertex_z }
    }

    pub fn propose(&self, track: &Track) -> StepProposal {
        let limit = if track.is_primary() && track.z() < self.vertex_z {
            StepLimit::Distance(self.vertex_z - track.z())
        } else {
            StepLimit::Unlimited
        };
        StepProposal {
            limit,
            condition: ForceCondition::NotForced,
        }
    }
}
