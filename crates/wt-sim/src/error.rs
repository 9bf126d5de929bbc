use std::time::Duration;

use thiserror::Error;
use wt_core::WtError;

use crate::SinkError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] WtError),

    #[error("{what} length {got} does not match sensor count {expected}")]
    SensorCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },
}

pub type SimResult<T> = Result<T, SimError>;

/// Why a single reading did not reach the sink.  Never fatal to the clock.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("sink rejected reading: {0}")]
    Sink(SinkError),

    #[error("sink did not answer within {0:?}")]
    Timeout(Duration),
}
