//! Bidirectional flow identifiers.

use std::cmp;
use std::fmt;
use std::net::SocketAddr;

use serde::Serialize;

/// A non-directional flow identifier.
///
/// Identifies one bidirectional TCP flow independent of the source and
/// destination socket address order: the keys for `(A, B)` and `(B, A)` are
/// equal and hash identically. Two packets belong to the same flow iff their
/// keys are equal.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Serialize)]
pub struct FlowKey(SocketAddr, SocketAddr);

impl FlowKey {
    /// Returns the flow key of a packet with `src` and `dst` endpoints.
    pub fn new(src: SocketAddr, dst: SocketAddr) -> Self {
        FlowKey(cmp::max(src, dst), cmp::min(src, dst))
    }
}

impl fmt::Display for FlowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <> ", self.0)?;
        write!(f, "{}", self.1)?;
        Ok(())
    }
}
