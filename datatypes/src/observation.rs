//! Labeled fingerprint observations.

use hellotrace_core::{Fingerprint, FlowKey};

use serde::Serialize;

/// One fingerprint recorded for one unique flow of a labeled traffic source.
///
/// Created during a capture session for one label, consumed once by
/// aggregation, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct Observation {
    /// Label of the traffic source (e.g. the client library under test).
    pub label: String,
    /// Fingerprint derived from the flow's ClientHello.
    pub fingerprint: Fingerprint,
    /// Flow the fingerprint was observed on.
    pub flow: FlowKey,
}

impl Observation {
    /// Creates an observation for `label`.
    pub fn new(label: String, fingerprint: Fingerprint, flow: FlowKey) -> Self {
        Observation {
            label,
            fingerprint,
            flow,
        }
    }
}
