//! End-to-end tests over synthetic ClientHello captures.

use hellotrace_core::config::CaptureConfig;
use hellotrace_core::protocols::packet::TCP_PROTOCOL;
use hellotrace_core::{CaptureSession, Fingerprint, RawPacket};

use std::net::SocketAddr;

const CLIENT: &str = "10.0.0.1:51234";
const SERVER: &str = "93.184.216.34:443";

fn addr(s: &str) -> SocketAddr {
    s.parse().unwrap()
}

fn packet<'a>(data: &'a [u8], src: &str, dst: &str) -> RawPacket<'a> {
    RawPacket {
        data,
        src: addr(src),
        dst: addr(dst),
        proto: TCP_PROTOCOL,
    }
}

/// Builds a complete TLS record carrying a ClientHello with the given record
/// version, cipher suites, and (empty-bodied) extensions.
fn build_client_hello(record_version: u16, ciphers: &[u16], extensions: &[u16]) -> Vec<u8> {
    let mut body = vec![0x01, 0x00, 0x00, 0x00];
    body.extend_from_slice(&0x0303u16.to_be_bytes());
    body.extend_from_slice(&[0u8; 32]);
    body.push(0);
    body.extend_from_slice(&((ciphers.len() * 2) as u16).to_be_bytes());
    for c in ciphers {
        body.extend_from_slice(&c.to_be_bytes());
    }
    body.push(1);
    body.push(0);
    let mut ext_block = Vec::new();
    for e in extensions {
        ext_block.extend_from_slice(&e.to_be_bytes());
        ext_block.extend_from_slice(&0u16.to_be_bytes());
    }
    body.extend_from_slice(&(ext_block.len() as u16).to_be_bytes());
    body.extend_from_slice(&ext_block);
    let msg_len = (body.len() - 4) as u32;
    body[1..4].copy_from_slice(&msg_len.to_be_bytes()[1..]);

    let mut buf = vec![0x16];
    buf.extend_from_slice(&record_version.to_be_bytes());
    buf.extend_from_slice(&(body.len() as u16).to_be_bytes());
    buf.extend_from_slice(&body);
    buf
}

#[test]
fn end_to_end_fingerprint() {
    let data = build_client_hello(0x0303, &[0x1301, 0x1302, 0x1303, 0x1304], &[0, 16, 11, 10]);
    let mut session = CaptureSession::new(CaptureConfig::default());
    let (_, fp) = session.process(&packet(&data, CLIENT, SERVER)).unwrap();
    assert_eq!(fp.as_str(), "t12d0404h2_9caa18292e23_9df5fff9b10e");
    assert_eq!(session.stats().fingerprints, 1);

    let stats = serde_json::to_value(session.stats()).unwrap();
    assert_eq!(stats["packets"], 1);
    assert_eq!(stats["fingerprints"], 1);
    assert_eq!(stats["truncated"], 0);
}

#[test]
fn wire_order_does_not_change_the_fingerprint() {
    let a = build_client_hello(0x0303, &[0x1301, 0x1302, 0x1303, 0x1304], &[0, 16, 11, 10]);
    let b = build_client_hello(0x0303, &[0x1304, 0x1301, 0x1303, 0x1302], &[10, 0, 11, 16]);
    let mut session = CaptureSession::new(CaptureConfig::default());
    let (_, fp_a) = session.process(&packet(&a, CLIENT, SERVER)).unwrap();
    let (_, fp_b) = session
        .process(&packet(&b, "10.0.0.2:40000", SERVER))
        .unwrap();
    assert_eq!(fp_a, fp_b);
}

#[test]
fn duplicate_flow_contributes_once() {
    let data = build_client_hello(0x0303, &[0x1301], &[0]);
    let mut session = CaptureSession::new(CaptureConfig::default());
    assert!(session.process(&packet(&data, CLIENT, SERVER)).is_some());
    // Same handshake captured again, and the reverse direction of the same
    // flow: both discarded.
    assert!(session.process(&packet(&data, CLIENT, SERVER)).is_none());
    assert!(session.process(&packet(&data, SERVER, CLIENT)).is_none());
    assert_eq!(session.stats().duplicate_flow, 2);
    // A distinct flow is unaffected by the first flow's state.
    assert!(session
        .process(&packet(&data, "10.0.0.1:51235", SERVER))
        .is_some());
    assert_eq!(session.flows_seen(), 2);
}

#[test]
fn failed_parse_does_not_claim_the_flow() {
    let data = build_client_hello(0x0303, &[0x1301], &[0]);
    let mut session = CaptureSession::new(CaptureConfig::default());
    // A truncated capture on the flow is skipped without claiming it.
    assert!(session.process(&packet(&data[..20], CLIENT, SERVER)).is_none());
    assert_eq!(session.stats().truncated, 1);
    // The real ClientHello on the same flow still contributes.
    assert!(session.process(&packet(&data, CLIENT, SERVER)).is_some());
}

#[test]
fn non_handshake_traffic_is_skipped_silently() {
    let mut session = CaptureSession::new(CaptureConfig::default());
    // Application data record.
    let app_data = [0x17, 0x03, 0x03, 0x00, 0x02, 0xab, 0xcd];
    assert!(session.process(&packet(&app_data, CLIENT, SERVER)).is_none());
    assert_eq!(session.stats().not_handshake, 1);

    // Handshake record carrying a ServerHello.
    let mut server_hello = build_client_hello(0x0303, &[0x1301], &[]);
    server_hello[5] = 0x02;
    assert!(session
        .process(&packet(&server_hello, SERVER, CLIENT))
        .is_none());
    assert_eq!(session.stats().wrong_message_type, 1);
}

#[test]
fn port_filter_and_transport_filter() {
    let data = build_client_hello(0x0303, &[0x1301], &[0]);
    let mut session = CaptureSession::new(CaptureConfig::default());

    // Neither endpoint on a watched port.
    assert!(session
        .process(&packet(&data, "10.0.0.1:51234", "93.184.216.34:80"))
        .is_none());
    assert_eq!(session.stats().port_filtered, 1);

    // Non-TCP transport.
    let mut udp = packet(&data, CLIENT, SERVER);
    udp.proto = 17;
    assert!(session.process(&udp).is_none());
    assert_eq!(session.stats().non_tcp, 1);

    // An empty watch list disables port filtering.
    let config = CaptureConfig {
        watch_ports: vec![],
        ..CaptureConfig::default()
    };
    let mut open_session = CaptureSession::new(config);
    assert!(open_session
        .process(&packet(&data, "10.0.0.1:51234", "93.184.216.34:80"))
        .is_some());
}

#[test]
fn truncation_sweep_never_panics() {
    let data = build_client_hello(0x0303, &[0x1301, 0x1302, 0x1303, 0x1304], &[0, 16, 11, 10]);
    for len in 0..data.len() {
        let mut session = CaptureSession::new(CaptureConfig::default());
        // Every prefix is either skipped or parsed; none may panic or emit
        // a fingerprint for a buffer that lost required fields.
        let result = session.process(&packet(&data[..len], CLIENT, SERVER));
        if len < 58 {
            assert!(result.is_none(), "length {}", len);
        }
    }
}

#[test]
fn distinct_offers_produce_distinct_fingerprints() {
    let a = build_client_hello(0x0303, &[0x1301, 0x1302], &[0, 16]);
    let b = build_client_hello(0x0303, &[0x1301, 0x1303], &[0, 16]);
    let mut session = CaptureSession::new(CaptureConfig::default());
    let (_, fp_a) = session.process(&packet(&a, CLIENT, SERVER)).unwrap();
    let (_, fp_b) = session
        .process(&packet(&b, "10.0.0.2:40000", SERVER))
        .unwrap();
    assert_ne!(fp_a, fp_b);
    assert_ne!(Fingerprint::from(fp_a.as_str()), fp_b);
}
