//! A compact engine for fingerprinting TLS clients from captured ClientHello
//! messages.
//!
//! Hellotrace derives a comparable identifier for the software agent behind an
//! encrypted connection without decrypting anything: the cleartext ClientHello
//! that precedes TLS encryption already carries the client's negotiated
//! version, offered cipher suites, offered extensions, and ALPN hints, and the
//! combination is distinctive enough to tell apart HTTP client libraries that
//! look identical at the HTTP layer.
//!
//! The engine is a pure, synchronous transformation: the caller feeds captured
//! packet payloads with their transport metadata into a [`CaptureSession`] and
//! receives one [`Fingerprint`] per unique flow back. Capturing packets,
//! persisting results, and reporting are left to external collaborators.
//! Capture sessions for different traffic sources may run concurrently as long
//! as each owns its own session instance; nothing in the engine blocks or
//! performs I/O.

pub mod capture;
pub mod config;
pub mod conntrack;
pub mod fingerprint;
pub mod protocols;
pub mod stats;

pub use self::capture::CaptureSession;
pub use self::config::CaptureConfig;
pub use self::conntrack::flow_id::FlowKey;
pub use self::fingerprint::Fingerprint;
pub use self::protocols::packet::RawPacket;
pub use self::protocols::tls::ClientHelloInfo;
