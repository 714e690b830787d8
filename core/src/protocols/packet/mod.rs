//! Packet-level input types.
//!
//! The engine does not capture traffic itself. An external capture layer
//! hands in one [`RawPacket`] per captured frame: the transport payload plus
//! the metadata needed to identify the flow it belongs to.

use std::net::SocketAddr;

/// TCP assigned protocol number.
pub const TCP_PROTOCOL: usize = 6;

/// A single captured packet payload with its transport metadata.
///
/// Supplied by the capture layer for the duration of one processing call.
/// The engine never retains the buffer; the only thing derived from the
/// metadata that outlives the call is the flow key.
#[derive(Debug, Clone, Copy)]
pub struct RawPacket<'a> {
    /// Transport payload, starting at the first byte after the TCP header.
    pub data: &'a [u8],
    /// Sender endpoint.
    pub src: SocketAddr,
    /// Receiver endpoint.
    pub dst: SocketAddr,
    /// Layer-4 IANA protocol number.
    pub proto: usize,
}

impl RawPacket<'_> {
    /// Returns `true` if the packet was carried over TCP.
    #[inline]
    pub fn is_tcp(&self) -> bool {
        self.proto == TCP_PROTOCOL
    }
}
