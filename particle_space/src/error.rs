//! World error types.

use thiserror::Error;

/// Errors a world operation can report back to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    /// Spawn attempted while the world already holds `capacity` bodies.
    #[error("world is full ({capacity} bodies)")]
    CapacityExceeded { capacity: usize },
}
