//! TLS record header reader.

use byteorder::{BigEndian, ByteOrder};

/// Handshake content type (first byte of a TLS record).
const CONTENT_TYPE_HANDSHAKE: u8 = 0x16;

/// Length of the TLS record header in bytes.
pub(crate) const RECORD_HEADER_LEN: usize = 5;

/// View over a single TLS handshake record within a packet payload.
///
/// The body is whatever the capture layer delivered past the header. It may
/// be shorter than the declared length; downstream parsing is responsible for
/// bounds-checked access, not this reader.
#[derive(Debug, Clone, Copy)]
pub struct TlsRecord<'a> {
    /// Record-layer protocol version.
    pub version: u16,
    /// Body length declared in the record header.
    pub length: u16,
    /// Record body as captured.
    pub body: &'a [u8],
}

/// Reads the TLS record header at the start of `buf`.
///
/// Returns `None` if the buffer is shorter than a record header or the
/// content type is not Handshake (0x16). Application data, alerts, and
/// non-TLS payloads are irrelevant to fingerprinting and rejected here
/// without error.
pub fn read_record(buf: &[u8]) -> Option<TlsRecord<'_>> {
    if buf.len() < RECORD_HEADER_LEN {
        return None;
    }
    if buf[0] != CONTENT_TYPE_HANDSHAKE {
        return None;
    }
    Some(TlsRecord {
        version: BigEndian::read_u16(&buf[1..3]),
        length: BigEndian::read_u16(&buf[3..5]),
        body: &buf[RECORD_HEADER_LEN..],
    })
}
