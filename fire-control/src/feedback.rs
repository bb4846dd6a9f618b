//! Operator-facing warnings and aborts.

use strum::{Display, EnumString};
use tracing::{error, warn};

/// Terminal failure classes with stable process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AbortCode {
    /// The host sent something other than target data on the target exchange.
    UnknownPacket,
    /// The link to the host dropped or returned garbage.
    LinkFailure,
    /// A counter-poll wait gave up without reaching its rotation target.
    MechanicalStall,
    /// Operator-requested shutdown.
    Manual,
}

impl AbortCode {
    /// Process exit code reported for this abort.
    pub fn exit_code(self) -> u8 {
        match self {
            Self::UnknownPacket => 10,
            Self::LinkFailure => 11,
            Self::MechanicalStall => 12,
            Self::Manual => 0,
        }
    }
}

/// Operator cue boundary: a buzzer, a display, or just the log.
///
/// The control loop only ever warns; `abort` is invoked by the top-level
/// driver right before it terminates the process.
pub trait OperatorFeedback {
    /// Non-fatal condition the operator should notice.
    fn warn(&mut self, message: &str);

    /// Terminal condition.
    fn abort(&mut self, code: AbortCode, message: &str);
}

/// Feedback through the tracing log, the only cue on a headless build.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFeedback;

impl OperatorFeedback for LogFeedback {
    fn warn(&mut self, message: &str) {
        warn!(target: "operator", "{message}");
    }

    fn abort(&mut self, code: AbortCode, message: &str) {
        error!(target: "operator", %code, "{message}");
    }
}
