//! ClientHello message parser.
//!
//! Walks the fixed-then-variable-length ClientHello fields with explicit
//! bounds checks. Truncation is a modeled outcome, not an exception: any
//! field that would read past the captured buffer yields
//! [`ParseError::Truncated`].

use super::record::TlsRecord;
use super::{ClientHelloInfo, EXT_ALPN, EXT_SERVER_NAME};

use std::cmp;

use byteorder::{BigEndian, ByteOrder};
use thiserror::Error;

/// ClientHello handshake message type.
const HANDSHAKE_TYPE_CLIENT_HELLO: u8 = 0x01;

/// Length of the handshake header: 1-byte type plus 24-bit length.
const HANDSHAKE_HEADER_LEN: usize = 4;

/// Length of the ClientHello random field.
const RANDOM_LEN: usize = 32;

/// Parse failure modes.
///
/// Both are expected capture artifacts, non-fatal to the caller; the
/// offending packet is skipped and the capture session continues.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// A required field would read past the end of the captured buffer.
    #[error("ClientHello truncated")]
    Truncated,

    /// The record carries a handshake message other than ClientHello.
    #[error("not a ClientHello message")]
    WrongMessageType,
}

/// Bounds-checked cursor over a record body.
struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Cursor { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn read_u8(&mut self) -> Result<u8, ParseError> {
        if self.remaining() < 1 {
            return Err(ParseError::Truncated);
        }
        let v = self.buf[self.pos];
        self.pos += 1;
        Ok(v)
    }

    fn read_u16(&mut self) -> Result<u16, ParseError> {
        if self.remaining() < 2 {
            return Err(ParseError::Truncated);
        }
        let v = BigEndian::read_u16(&self.buf[self.pos..self.pos + 2]);
        self.pos += 2;
        Ok(v)
    }

    fn skip(&mut self, n: usize) -> Result<(), ParseError> {
        if self.remaining() < n {
            return Err(ParseError::Truncated);
        }
        self.pos += n;
        Ok(())
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], ParseError> {
        if self.remaining() < n {
            return Err(ParseError::Truncated);
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }
}

/// Parses the ClientHello message in `record`.
///
/// The ClientHello's own legacy version field is bounds-checked and skipped;
/// the version recorded in the result is the record-layer version, which is
/// what the fingerprint tag derives from.
pub fn parse_client_hello(record: &TlsRecord) -> Result<ClientHelloInfo, ParseError> {
    let body = record.body;
    log::trace!("parse_client_hello ({} bytes)", body.len());

    // Handshake header. The 24-bit message length is not validated against
    // the captured buffer, mirroring the record reader's lenient stance.
    if body.len() < HANDSHAKE_HEADER_LEN {
        return Err(ParseError::Truncated);
    }
    if body[0] != HANDSHAKE_TYPE_CLIENT_HELLO {
        return Err(ParseError::WrongMessageType);
    }

    let mut cur = Cursor::new(body);
    cur.skip(HANDSHAKE_HEADER_LEN)?;

    // Legacy client version and random.
    cur.skip(2 + RANDOM_LEN)?;

    // Session ID.
    let session_id_len = cur.read_u8()? as usize;
    cur.skip(session_id_len)?;

    // Cipher suites, in wire order. An odd block length leaves a trailing
    // byte that no cipher code can use; it is consumed and ignored.
    let cipher_block_len = cur.read_u16()? as usize;
    let cipher_block = cur.take(cipher_block_len)?;
    let cipher_suites: Vec<u16> = cipher_block
        .chunks_exact(2)
        .map(BigEndian::read_u16)
        .collect();

    // Compression methods.
    let compression_len = cur.read_u8()? as usize;
    cur.skip(compression_len)?;

    // Extensions. The walk stops as soon as the next 4-byte extension header
    // would exceed the declared block or the buffer; types collected up to
    // that point are kept.
    let extensions_len = cur.read_u16()? as usize;
    let ext_end = cmp::min(cur.pos + extensions_len, body.len());
    let mut extension_types = Vec::new();
    while cur.pos + 4 <= ext_end {
        let ext_type = cur.read_u16()?;
        let ext_len = cur.read_u16()? as usize;
        extension_types.push(ext_type);
        if cur.skip(ext_len).is_err() {
            log::debug!("short final extension {:#06x}, stopping", ext_type);
            break;
        }
    }

    let has_alpn = extension_types.contains(&EXT_ALPN);
    let has_sni = extension_types.contains(&EXT_SERVER_NAME);

    Ok(ClientHelloInfo {
        version: record.version,
        cipher_suites,
        extension_types,
        has_alpn,
        has_sni,
    })
}
