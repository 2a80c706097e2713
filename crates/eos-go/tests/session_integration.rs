//! Integration tests for the session lifecycle.
//!
//! These tests drive the `SessionController` through its public API with the
//! real JSON config store on a scratch directory.  Datagrams are captured by
//! the recording transport, except in the loopback test, which sends a real
//! UDP packet to the OSC monitor.
//!
//! ```text
//! start()  ──► load data.json ──► fallback to 127.0.0.1:8000 if unusable
//! apply()  ──► validate ──► save data.json ──► new client ──► swap
//! send()   ──► current client ──► one datagram, /eos/key/go_0, no args
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use eos_core::{encode_go_command, ConfigError, EndpointConfig, GO_KEY_PATH};
use eos_go::application::session::{ApplyError, SessionController};
use eos_go::infrastructure::network::control_client::UdpTransportFactory;
use eos_go::infrastructure::network::mock::RecordingTransportFactory;
use eos_go::infrastructure::network::monitor::{OscMonitor, Received};
use eos_go::infrastructure::storage::config::{ConfigStore, JsonConfigStore};
use uuid::Uuid;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A scratch directory that is removed when dropped.
struct Scratch(PathBuf);

impl Scratch {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("eos_go_it_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create scratch dir");
        Self(dir)
    }

    fn config_path(&self) -> PathBuf {
        self.0.join("data.json")
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.0).ok();
    }
}

fn start_recording(config: &PathBuf) -> (SessionController, RecordingTransportFactory) {
    let factory = RecordingTransportFactory::new();
    let controller = SessionController::start(
        Box::new(JsonConfigStore::new(config)),
        Box::new(factory.clone()),
    )
    .expect("start must succeed");
    (controller, factory)
}

fn addr(s: &str) -> SocketAddr {
    s.parse().unwrap()
}

// ── Start-up ──────────────────────────────────────────────────────────────────

#[test]
fn test_start_without_config_file_uses_default_endpoint() {
    let scratch = Scratch::new();

    let (controller, _factory) = start_recording(&scratch.config_path());

    assert_eq!(controller.endpoint(), EndpointConfig::default());
    assert!(
        !scratch.config_path().exists(),
        "start must not create the config file"
    );
}

#[test]
fn test_start_with_garbage_config_recovers_to_default() {
    // Arrange
    let scratch = Scratch::new();
    std::fs::write(scratch.config_path(), b"\x89PNG\r\n\x1a\n\x00\x00garbage").unwrap();

    // Act
    let (controller, factory) = start_recording(&scratch.config_path());
    controller.send_command().expect("send");

    // Assert
    assert_eq!(controller.endpoint().socket_addr(), addr("127.0.0.1:8000"));
    assert_eq!(factory.sent()[0].target, addr("127.0.0.1:8000"));
}

#[test]
fn test_start_with_invalid_stored_values_recovers_to_default() {
    let scratch = Scratch::new();
    std::fs::write(scratch.config_path(), r#"{"IP": "999.1.1.1", "PORT": "9000"}"#).unwrap();

    let (controller, _factory) = start_recording(&scratch.config_path());

    assert_eq!(controller.endpoint(), EndpointConfig::default());
}

#[test]
fn test_start_with_empty_stored_values_recovers_to_default() {
    let scratch = Scratch::new();
    std::fs::write(scratch.config_path(), r#"{"IP": "", "PORT": ""}"#).unwrap();

    let (controller, _factory) = start_recording(&scratch.config_path());

    assert_eq!(controller.endpoint(), EndpointConfig::default());
}

#[test]
fn test_start_accepts_numeric_port_in_config_file() {
    let scratch = Scratch::new();
    std::fs::write(
        scratch.config_path(),
        "{\n    \"IP\": \"192.168.1.50\",\n    \"PORT\": 3032\n}",
    )
    .unwrap();

    let (controller, _factory) = start_recording(&scratch.config_path());

    assert_eq!(controller.endpoint().socket_addr(), addr("192.168.1.50:3032"));
}

// ── Apply + send scenarios ────────────────────────────────────────────────────

#[test]
fn test_apply_then_send_targets_new_endpoint_with_go_message() {
    // Arrange
    let scratch = Scratch::new();
    let (controller, factory) = start_recording(&scratch.config_path());

    // Act
    controller
        .apply_configuration("10.0.0.5", "9000")
        .expect("valid configuration");
    controller.send_command().expect("send");

    // Assert
    let sent = factory.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].target, addr("10.0.0.5:9000"));
    assert_eq!(sent[0].bytes, encode_go_command().unwrap());

    let packet = eos_core::decode_packet(&sent[0].bytes).unwrap();
    let messages = eos_core::protocol::flatten_messages(packet);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].addr, GO_KEY_PATH);
    assert!(messages[0].args.is_empty());
}

#[test]
fn test_apply_out_of_range_port_leaves_previous_endpoint_active() {
    // Arrange
    let scratch = Scratch::new();
    let (controller, factory) = start_recording(&scratch.config_path());
    controller.apply_configuration("10.0.0.4", "8000").unwrap();
    let stored_before = std::fs::read_to_string(scratch.config_path()).unwrap();

    // Act
    let result = controller.apply_configuration("10.0.0.5", "70000");
    controller.send_command().expect("send");

    // Assert
    assert!(matches!(
        result,
        Err(ApplyError::Invalid(ConfigError::PortOutOfRange(_)))
    ));
    assert_eq!(factory.sent()[0].target, addr("10.0.0.4:8000"));
    assert_eq!(
        std::fs::read_to_string(scratch.config_path()).unwrap(),
        stored_before,
        "rejected input must not be persisted"
    );
}

#[test]
fn test_apply_bad_address_reports_address_error_even_with_valid_port() {
    let scratch = Scratch::new();
    let (controller, _factory) = start_recording(&scratch.config_path());

    let result = controller.apply_configuration("bad-ip", "9000");

    assert!(matches!(
        result,
        Err(ApplyError::Invalid(ConfigError::InvalidAddress(_)))
    ));
    assert!(!scratch.config_path().exists());
}

#[test]
fn test_applied_endpoint_survives_restart() {
    // Arrange
    let scratch = Scratch::new();
    {
        let (controller, _factory) = start_recording(&scratch.config_path());
        controller.apply_configuration(" fe80::1 ", " 53000 ").unwrap();
    }

    // Act: a fresh session reading the same file.
    let (restarted, _factory) = start_recording(&scratch.config_path());

    // Assert
    assert_eq!(restarted.endpoint().to_string(), "[fe80::1]:53000");
}

#[test]
fn test_save_then_load_round_trip_through_store() {
    let scratch = Scratch::new();
    let store = JsonConfigStore::new(scratch.config_path());
    let endpoint = EndpointConfig::parse("172.16.4.2", "8000").unwrap();

    store.save(&endpoint).unwrap();
    let first = store.load();
    let second = store.load();

    assert_eq!(first, second, "load must be idempotent");
    assert_eq!(first.to_endpoint(), Ok(endpoint));
}

// ── Real UDP ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_go_reaches_osc_monitor_over_loopback() {
    // Arrange: a monitor on an OS-assigned loopback port.
    let scratch = Scratch::new();
    let mut monitor = OscMonitor::bind(addr("127.0.0.1:0")).await.expect("bind");
    let port = monitor.local_addr().unwrap().port().to_string();
    let controller = SessionController::start(
        Box::new(JsonConfigStore::new(scratch.config_path())),
        Box::new(UdpTransportFactory),
    )
    .expect("start");

    // Act
    controller
        .apply_configuration("127.0.0.1", &port)
        .expect("apply");
    controller.send_command().expect("send");
    let received = tokio::time::timeout(Duration::from_secs(2), monitor.recv())
        .await
        .expect("GO must arrive")
        .expect("recv");

    // Assert
    match received {
        Received::Messages { messages, .. } => {
            assert_eq!(messages.len(), 1);
            assert_eq!(messages[0].addr, GO_KEY_PATH);
            assert!(messages[0].args.is_empty());
        }
        other => panic!("expected an OSC message, got {other:?}"),
    }
}
