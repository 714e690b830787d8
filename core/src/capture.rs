//! Capture-session pipeline.
//!
//! One [`CaptureSession`] per labeled traffic source per run. Packets flow
//! through the transport and port filters, the flow deduplicator, the record
//! reader, and the ClientHello parser; each surviving packet yields one
//! fingerprint for its flow.

use crate::config::CaptureConfig;
use crate::conntrack::flow_id::FlowKey;
use crate::conntrack::Deduplicator;
use crate::fingerprint::Fingerprint;
use crate::protocols::packet::RawPacket;
use crate::protocols::tls::{parse_client_hello, read_record, ParseError};
use crate::stats::SessionStats;

/// Converts one capture session's packets into per-flow fingerprints.
///
/// Owns all per-session state; dropping the session drops the state.
/// Sessions for different labels may run concurrently as long as each owns
/// its own instance.
#[derive(Debug)]
pub struct CaptureSession {
    config: CaptureConfig,
    dedup: Deduplicator,
    stats: SessionStats,
}

impl CaptureSession {
    /// Creates a session with `config`.
    pub fn new(config: CaptureConfig) -> Self {
        let dedup = Deduplicator::new(config.max_flows);
        CaptureSession {
            config,
            dedup,
            stats: SessionStats::default(),
        }
    }

    /// Processes a single captured packet.
    ///
    /// Returns the flow key and fingerprint for the first valid ClientHello
    /// on a new flow, and `None` for every other packet. Skipped packets are
    /// counted in [`SessionStats`]; no skip is fatal to the session.
    pub fn process(&mut self, pkt: &RawPacket) -> Option<(FlowKey, Fingerprint)> {
        self.stats.packets += 1;

        if !pkt.is_tcp() {
            self.stats.non_tcp += 1;
            return None;
        }
        if !self.watches(pkt) {
            self.stats.port_filtered += 1;
            return None;
        }

        let key = FlowKey::new(pkt.src, pkt.dst);
        if self.dedup.contains(&key) {
            self.stats.duplicate_flow += 1;
            return None;
        }

        let record = match read_record(pkt.data) {
            Some(record) => record,
            None => {
                self.stats.not_handshake += 1;
                return None;
            }
        };

        let info = match parse_client_hello(&record) {
            Ok(info) => info,
            Err(ParseError::Truncated) => {
                log::debug!("truncated ClientHello on {}", key);
                self.stats.truncated += 1;
                return None;
            }
            Err(ParseError::WrongMessageType) => {
                self.stats.wrong_message_type += 1;
                return None;
            }
        };

        if !self.dedup.mark_seen(key) {
            log::warn!("flow table full, dropping {}", key);
            self.stats.flows_dropped += 1;
            return None;
        }

        self.stats.fingerprints += 1;
        Some((key, Fingerprint::encode(&info)))
    }

    /// Returns `true` if the packet passes the configured port filter.
    fn watches(&self, pkt: &RawPacket) -> bool {
        let ports = &self.config.watch_ports;
        ports.is_empty() || ports.contains(&pkt.src.port()) || ports.contains(&pkt.dst.port())
    }

    /// Session counters so far.
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Number of flows that have contributed a fingerprint.
    pub fn flows_seen(&self) -> usize {
        self.dedup.len()
    }
}
