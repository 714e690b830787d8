//! Types for parsing packet payloads.
//!
//! The `packet` module holds the capture-facing input types; the `tls` module
//! walks TLS handshake records and ClientHello messages.

pub mod packet;
pub mod tls;
