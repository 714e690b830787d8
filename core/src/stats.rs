//! Per-session diagnostic counters.
//!
//! Parse failures never escalate past the packet that produced them; these
//! counters are the only trace a skipped packet leaves. Counters are owned
//! by their capture session, never shared process-wide.

use serde::Serialize;

/// Counts every accept and skip outcome within one capture session.
#[derive(Debug, Default, Clone, Serialize)]
pub struct SessionStats {
    /// Packets handed to the session.
    pub packets: u64,
    /// Packets skipped for a non-TCP transport.
    pub non_tcp: u64,
    /// Packets skipped by the port filter.
    pub port_filtered: u64,
    /// Packets discarded because their flow already contributed.
    pub duplicate_flow: u64,
    /// Packets whose payload does not begin a TLS handshake record.
    pub not_handshake: u64,
    /// ClientHello messages cut short by the capture.
    pub truncated: u64,
    /// Handshake records carrying a message other than ClientHello.
    pub wrong_message_type: u64,
    /// Flows dropped because the flow table was at capacity.
    pub flows_dropped: u64,
    /// Fingerprints emitted.
    pub fingerprints: u64,
}
