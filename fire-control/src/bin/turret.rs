//! Console driver for the turret fire-control loop.
//!
//! Connects to the perception host over TCP, runs firing cycles, and maps
//! fatal pipeline errors to operator aborts and process exit codes. Motion
//! runs against the simulated actuators; real motor drivers plug in behind
//! the same `hardware::Actuator` trait.

use std::net::TcpStream;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use fire_control::{
    AbortCode, CycleOutcome, FireControl, FireControlConfig, FireControlError, LogFeedback,
    OperatorFeedback, Rotator, Shooter,
};
use hardware::SimulatedActuator;
use host_link::{HostLink, LinkError};
use targeting::PolicyKind;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Turret fire-control driver
#[derive(Parser, Debug)]
#[command(name = "turret")]
#[command(about = "Aim-and-fire control loop for the projectile turret")]
#[command(version)]
struct Args {
    /// Perception host address (ip:port)
    #[arg(long, default_value = "192.168.2.1:5800")]
    host: String,

    /// Config file (JSON); built-in defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured targeting policy
    #[arg(long)]
    policy: Option<PolicyKind>,

    /// Number of firing cycles to run
    #[arg(long, default_value = "1")]
    cycles: u32,

    /// Relay telemetry over the debug channel after each shot
    #[arg(long)]
    debug: bool,

    /// Simulated actuator top speed, shaft deg/s
    #[arg(long, default_value = "820")]
    sim_speed: f32,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let mut config = match &args.config {
        Some(path) => FireControlConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => FireControlConfig::default(),
    };
    if let Some(policy) = args.policy {
        config.policy = policy;
    }
    if args.debug {
        config.debug = true;
    }

    info!(host = %args.host, policy = %config.policy, "connecting to perception host");
    let stream = TcpStream::connect(&args.host)
        .with_context(|| format!("connecting to perception host at {}", args.host))?;
    let link = HostLink::new(stream);

    let timeout = config.stall_timeout();
    let rotator = Rotator::new(
        SimulatedActuator::new(args.sim_speed),
        &config.calibration,
        timeout,
    );
    let shooter = Shooter::new(
        SimulatedActuator::new(args.sim_speed),
        config.calibration,
        timeout,
    );

    let mut control = FireControl::from_config(&config, link, LogFeedback, rotator, shooter);

    for cycle in 0..args.cycles {
        match control.run_cycle() {
            Ok(CycleOutcome::Fired {
                rotations,
                final_angle_deg,
                distance_cm,
            }) => info!(cycle, rotations, final_angle_deg, distance_cm, "shot fired"),
            Ok(CycleOutcome::NoTargets) => info!(cycle, "no targets this cycle"),
            Ok(CycleOutcome::OutOfRange(range)) => warn!(cycle, %range, "target out of range"),
            Err(err) => return Ok(abort_for(&err, control.feedback_mut())),
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Map a fatal pipeline error to an operator abort and an exit code.
/// Process termination happens only here, never inside the control loop.
fn abort_for(err: &FireControlError, feedback: &mut dyn OperatorFeedback) -> ExitCode {
    let code = match err {
        FireControlError::Link(LinkError::UnexpectedPacket { .. }) => AbortCode::UnknownPacket,
        FireControlError::Link(_) => AbortCode::LinkFailure,
        FireControlError::Stall(_) => AbortCode::MechanicalStall,
    };
    feedback.abort(code, &err.to_string());
    ExitCode::from(code.exit_code())
}
