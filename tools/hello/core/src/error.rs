use thiserror::Error;

use crate::host::{PixelFormat, Sink};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("core is not initialized")]
    NotInitialized,
    #[error("core halted after a failed init")]
    Halted,
    #[error("frontend rejected pixel format {0:?}")]
    PixelFormatRejected(PixelFormat),
    #[error("no {0} callback registered")]
    MissingSink(Sink),
}

/// Returned by a [`Host`](crate::host::Host) that cannot service a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SinkError {
    #[error("{0} sink is not registered")]
    Missing(Sink),
}

impl From<SinkError> for CoreError {
    fn from(err: SinkError) -> Self {
        match err {
            SinkError::Missing(sink) => CoreError::MissingSink(sink),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}
