//! The align-then-fire cycle.

use hardware::{Actuator, StallError};
use host_link::{LinkError, TargetSource};
use targeting::{DirectionModel, DistanceModel, TargetPolicy};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::FireControlConfig;
use crate::feedback::OperatorFeedback;
use crate::rotator::Rotator;
use crate::shooter::{RangeError, ShotError, Shooter};

/// Fatal cycle failures.
///
/// The top-level driver maps these to an operator abort and a process exit
/// code; the control loop itself never terminates the process.
#[derive(Debug, Error)]
pub enum FireControlError {
    #[error(transparent)]
    Link(#[from] LinkError),
    #[error(transparent)]
    Stall(#[from] StallError),
}

/// How one firing cycle ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleOutcome {
    /// One projectile launched.
    Fired {
        /// Platform rotations it took to align.
        rotations: u32,
        /// Residual off-center angle at launch, degrees.
        final_angle_deg: f32,
        /// Distance the shot was calibrated for, cm.
        distance_cm: f32,
    },
    /// Perception reported an empty target set; no shot fired.
    NoTargets,
    /// The selected target sits outside the launcher's reach; no shot, no
    /// retry within this cycle.
    OutOfRange(RangeError),
}

/// One complete aim-and-fire pipeline over explicit collaborators.
///
/// "Exactly one active loop per robot" is an ownership property: the driver
/// constructs one `FireControl` around the actuators and drives it cycle by
/// cycle.
pub struct FireControl<R, G, S, F>
where
    R: Actuator,
    G: Actuator,
    S: TargetSource,
    F: OperatorFeedback,
{
    source: S,
    feedback: F,
    rotator: Rotator<R>,
    shooter: Shooter<G>,
    policy: TargetPolicy,
    direction: DirectionModel,
    distance: DistanceModel,
    alignment_threshold_deg: f32,
    debug: bool,
}

impl<R, G, S, F> FireControl<R, G, S, F>
where
    R: Actuator,
    G: Actuator,
    S: TargetSource,
    F: OperatorFeedback,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: S,
        feedback: F,
        rotator: Rotator<R>,
        shooter: Shooter<G>,
        policy: TargetPolicy,
        direction: DirectionModel,
        distance: DistanceModel,
        alignment_threshold_deg: f32,
        debug: bool,
    ) -> Self {
        Self {
            source,
            feedback,
            rotator,
            shooter,
            policy,
            direction,
            distance,
            alignment_threshold_deg,
            debug,
        }
    }

    /// Assemble the pipeline from a loaded configuration.
    pub fn from_config(
        config: &FireControlConfig,
        source: S,
        feedback: F,
        rotator: Rotator<R>,
        shooter: Shooter<G>,
    ) -> Self {
        Self::new(
            source,
            feedback,
            rotator,
            shooter,
            TargetPolicy::new(config.policy),
            config.direction_model(),
            config.distance_model(),
            config.alignment_threshold_deg,
            config.debug,
        )
    }

    /// Run one firing attempt to completion.
    ///
    /// Perception is re-polled after every rotation: turning the platform
    /// changes what the camera sees. The align sub-loop is unbounded, like
    /// the hardware it drives; each pass is logged so a hung alignment shows
    /// up in traces.
    pub fn run_cycle(&mut self) -> Result<CycleOutcome, FireControlError> {
        let mut rotations = 0u32;
        loop {
            let container = self.source.fetch_targets()?;
            let Some(target) = self.policy.select(&container) else {
                self.feedback.warn("no targets found");
                return Ok(CycleOutcome::NoTargets);
            };

            let angle = self.direction.angle_to(&container, &target);
            if angle.abs() > self.alignment_threshold_deg {
                debug!(angle, rotations, "misaligned, rotating");
                self.rotator.turn(angle)?;
                rotations += 1;
                continue;
            }

            let distance = self.distance.distance_to(&target);
            return match self.shooter.shoot(distance) {
                Ok(()) => {
                    if self.debug {
                        self.relay_telemetry(rotations, angle, distance);
                    }
                    Ok(CycleOutcome::Fired {
                        rotations,
                        final_angle_deg: angle,
                        distance_cm: distance,
                    })
                }
                Err(ShotError::Range(range)) => {
                    self.feedback.warn(&range.to_string());
                    Ok(CycleOutcome::OutOfRange(range))
                }
                Err(ShotError::Stall(stall)) => Err(stall.into()),
            };
        }
    }

    /// Best effort: a failed relay must not turn a successful shot into an
    /// error.
    fn relay_telemetry(&mut self, rotations: u32, angle: f32, distance: f32) {
        let line = format!("rotations: {rotations}, angle: {angle:.4} deg, distance: {distance:.1} cm");
        if let Err(err) = self.source.send_debug(&line) {
            warn!(%err, "debug relay failed");
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut F {
        &mut self.feedback
    }

    pub fn rotator(&self) -> &Rotator<R> {
        &self.rotator
    }

    pub fn shooter(&self) -> &Shooter<G> {
        &self.shooter
    }
}
