use thiserror::Error;

/// Errors that can occur when reading device telemetry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The running platform has no equivalent call.
    #[error("not supported on this platform")]
    NotSupported,

    /// A disk space format code outside `0..=3` was supplied.
    #[error("invalid disk space format: {0}")]
    InvalidFormat(i32),

    /// The host OS call failed.
    #[error("Platform error: {0}")]
    Platform(String),
}
