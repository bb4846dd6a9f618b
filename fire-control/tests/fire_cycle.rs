//! Full align-then-fire cycle scenarios over scripted collaborators.

use std::collections::VecDeque;

use approx::assert_relative_eq;
use fire_control::{
    AbortCode, Calibration, CycleOutcome, FireControl, FireControlConfig, FireControlError,
    OperatorFeedback, RangeError, Rotator, Shooter,
};
use hardware::mock::{ActuatorEvent, RecordingActuator};
use hardware::Direction;
use host_link::{LinkError, TargetSource};
use targeting::{TargetBox, TargetContainer};

/// Target source that replays a scripted sequence of responses.
struct ScriptedSource {
    responses: VecDeque<Result<TargetContainer, LinkError>>,
    fetches: usize,
    debug_lines: Vec<String>,
}

impl ScriptedSource {
    fn new(responses: Vec<Result<TargetContainer, LinkError>>) -> Self {
        Self {
            responses: responses.into(),
            fetches: 0,
            debug_lines: Vec::new(),
        }
    }
}

impl TargetSource for ScriptedSource {
    fn fetch_targets(&mut self) -> Result<TargetContainer, LinkError> {
        self.fetches += 1;
        self.responses
            .pop_front()
            .expect("cycle polled more often than scripted")
    }

    fn send_debug(&mut self, message: &str) -> Result<(), LinkError> {
        self.debug_lines.push(message.to_owned());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingFeedback {
    warnings: Vec<String>,
    aborts: Vec<(AbortCode, String)>,
}

impl OperatorFeedback for RecordingFeedback {
    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_owned());
    }

    fn abort(&mut self, code: AbortCode, message: &str) {
        self.aborts.push((code, message.to_owned()));
    }
}

/// Distance the default fit maps exactly to `power`.
fn distance_for_power(power: i32) -> f32 {
    let c = Calibration::default();
    c.power_fit.intercept + c.power_fit.slope * power as f32 - c.distance_offset_cm
}

/// A box whose bottom edge projects to the given launch power, centered at
/// `middle_x` in a 480 px frame.
fn target_for_power(middle_x: f32, power: i32) -> TargetBox {
    let c = Calibration::default();
    let bottom = c.horizon_row + c.projection_gain / distance_for_power(power);
    TargetBox::new(middle_x - 20.0, middle_x + 20.0, bottom - 80.0, bottom)
}

fn frame(targets: Vec<TargetBox>) -> Result<TargetContainer, LinkError> {
    Ok(TargetContainer::new(480.0, targets))
}

fn pipeline(
    responses: Vec<Result<TargetContainer, LinkError>>,
    debug: bool,
) -> FireControl<RecordingActuator, RecordingActuator, ScriptedSource, RecordingFeedback> {
    let config = FireControlConfig {
        debug,
        ..FireControlConfig::default()
    };
    let rotator = Rotator::new(RecordingActuator::new(10), &config.calibration, None);
    let shooter = Shooter::new(RecordingActuator::new(10), config.calibration, None);
    FireControl::from_config(
        &config,
        ScriptedSource::new(responses),
        RecordingFeedback::default(),
        rotator,
        shooter,
    )
}

#[test]
fn centered_target_fires_without_rotating() {
    let mut control = pipeline(vec![frame(vec![target_for_power(240.0, 70)])], false);

    match control.run_cycle().unwrap() {
        CycleOutcome::Fired {
            rotations,
            final_angle_deg,
            distance_cm,
        } => {
            assert_eq!(rotations, 0);
            assert_eq!(final_angle_deg, 0.0);
            assert_relative_eq!(distance_cm, distance_for_power(70), epsilon = 0.05);
        }
        other => panic!("expected a shot, got {other:?}"),
    }

    assert!(control.rotator().actuator().events().is_empty());
    // Fire stroke followed by the reset stroke.
    let events = control.shooter().actuator().events();
    assert_eq!(events[0], ActuatorEvent::SetDirection(Direction::Forward));
    assert_eq!(events[1], ActuatorEvent::SetPower(70));
    assert_eq!(events[4], ActuatorEvent::SetDirection(Direction::Backward));
    assert_eq!(control.shooter().actuator().counter(), 0);
}

#[test]
fn misaligned_target_rotates_then_fires() {
    // First poll sees the target a quarter frame left of center; after the
    // turn the re-poll sees it centered.
    let mut control = pipeline(
        vec![
            frame(vec![target_for_power(120.0, 70)]),
            frame(vec![target_for_power(240.0, 70)]),
        ],
        false,
    );

    match control.run_cycle().unwrap() {
        CycleOutcome::Fired { rotations, .. } => assert_eq!(rotations, 1),
        other => panic!("expected a shot, got {other:?}"),
    }

    assert_eq!(control.source().fetches, 2);
    // (120 - 240) * 26.725 / 240 = -13.3625 deg: a counter-clockwise turn.
    let rotator_events = control.rotator().actuator().events();
    assert_eq!(
        rotator_events[0],
        ActuatorEvent::SetDirection(Direction::Backward)
    );
    assert_eq!(rotator_events[1], ActuatorEvent::SetPower(40));
}

#[test]
fn empty_target_set_warns_and_ends_the_cycle() {
    let mut control = pipeline(vec![frame(vec![])], false);

    assert_eq!(control.run_cycle().unwrap(), CycleOutcome::NoTargets);
    assert_eq!(control.feedback().warnings, ["no targets found"]);
    assert!(control.shooter().actuator().events().is_empty());
}

#[test]
fn out_of_range_target_warns_without_retry() {
    // Power 30 maps well below the minimum of 45.
    let mut control = pipeline(vec![frame(vec![target_for_power(240.0, 30)])], false);

    match control.run_cycle().unwrap() {
        CycleOutcome::OutOfRange(RangeError::TooClose { power: 30, min: 45 }) => {}
        other => panic!("expected too close, got {other:?}"),
    }

    assert_eq!(control.source().fetches, 1, "no retry within the cycle");
    assert_eq!(control.feedback().warnings.len(), 1);
    assert!(control.shooter().actuator().events().is_empty());
}

#[test]
fn too_far_target_is_soft_aborted() {
    let mut control = pipeline(vec![frame(vec![target_for_power(240.0, 110)])], false);

    match control.run_cycle().unwrap() {
        CycleOutcome::OutOfRange(RangeError::TooFar { power: 110 }) => {}
        other => panic!("expected too far, got {other:?}"),
    }
}

#[test]
fn protocol_violation_propagates_as_fatal() {
    let mut control = pipeline(vec![Err(LinkError::UnexpectedPacket { id: 0x42 })], false);

    match control.run_cycle() {
        Err(FireControlError::Link(LinkError::UnexpectedPacket { id: 0x42 })) => {}
        other => panic!("expected a protocol error, got {other:?}"),
    }
    assert!(control.feedback().aborts.is_empty(), "core never aborts");
}

#[test]
fn debug_mode_relays_telemetry_after_the_shot() {
    let mut control = pipeline(vec![frame(vec![target_for_power(240.0, 70)])], true);

    control.run_cycle().unwrap();
    let lines = &control.source().debug_lines;
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("rotations: 0"), "line: {}", lines[0]);
}
