//! Library side of the `fplx-check` binary: logging setup and the check
//! pipeline, exposed so integration tests can drive a run without a process.

pub mod logging;
pub mod pipeline;
