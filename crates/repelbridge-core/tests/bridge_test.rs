// Integration tests for `Bridge` against a wiremock controller.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use repelbridge_core::{
    Availability, Bridge, BridgeConfig, BridgeError, BusId, ConnectionState, RgbColor,
};

// ── Helpers ─────────────────────────────────────────────────────────

/// Bridge pointed at a mock server, scheduled polling disabled so tests
/// drive `poll()` explicitly.
async fn setup() -> (MockServer, Bridge) {
    let server = MockServer::start().await;
    let addr = server.address();
    let config = BridgeConfig {
        host: addr.ip().to_string(),
        port: addr.port(),
        poll_interval: Duration::ZERO,
        ..BridgeConfig::default()
    };
    let bridge = Bridge::new(config).expect("valid config");
    (server, bridge)
}

async fn mount_system(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/system/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "device_name": "RepelBridge",
            "firmware_version": "1.4.2",
            "wifi_connected": true,
            "uptime_ms": 3_600_000u64
        })))
        .mount(server)
        .await;
}

/// Mount all four read endpoints for one bus.
async fn mount_bus(server: &MockServer, bus: u8, powered: bool, brightness: u8) {
    Mock::given(method("GET"))
        .and(path(format!("/api/bus/{bus}/status")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "powered": powered,
            "brightness": brightness,
            "color": { "red": 255, "green": 0, "blue": 0 },
            "repeller_count": 2
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/bus/{bus}/cartridge")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "runtime_hours": 42,
            "percent_left": 80
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/bus/{bus}/auto_shutoff")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "auto_shutoff_minutes": 120
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/bus/{bus}/warn_at")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "warn_at_hours": 97
        })))
        .mount(server)
        .await;
}

async fn mount_all_healthy(server: &MockServer) {
    mount_system(server).await;
    mount_bus(server, 0, true, 200).await;
    mount_bus(server, 1, false, 0).await;
}

// ── Polling ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_poll_merges_system_and_both_buses() {
    let (server, bridge) = setup().await;
    mount_all_healthy(&server).await;

    let snap = bridge.poll().await.unwrap();

    assert!(snap.system.available());
    assert_eq!(snap.system.device_name, "RepelBridge");
    assert_eq!(snap.system.uptime, Duration::from_secs(3600));

    let bus0 = snap.bus(BusId::Bus0);
    assert!(bus0.available());
    assert!(bus0.powered);
    assert_eq!(bus0.brightness, 200);
    assert_eq!(bus0.auto_shutoff_minutes, 120);
    assert_eq!(bus0.warn_at_hours, 97);

    let bus1 = snap.bus(BusId::Bus1);
    assert!(bus1.available());
    assert!(!bus1.powered);

    assert!(snap.last_refresh.is_some());
}

#[tokio::test]
async fn test_one_bus_failing_does_not_degrade_the_other() {
    let (server, bridge) = setup().await;
    mount_system(&server).await;
    mount_bus(&server, 0, true, 100).await;
    // Bus 1 answers 500 on its status endpoint; the other three GETs
    // succeed, but the slice is all-or-nothing.
    Mock::given(method("GET"))
        .and(path("/api/bus/1/status"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let snap = bridge.poll().await.unwrap();

    assert!(snap.bus(BusId::Bus0).available());
    assert_eq!(snap.bus(BusId::Bus0).brightness, 100);
    assert_eq!(snap.bus(BusId::Bus1).availability, Availability::Stale);
}

#[tokio::test]
async fn test_unreachable_controller_fails_poll_and_flags_state() {
    let bridge = Bridge::new(BridgeConfig {
        host: "127.0.0.1".into(),
        port: 1,
        timeout: Duration::from_secs(2),
        poll_interval: Duration::ZERO,
        ..BridgeConfig::default()
    })
    .unwrap();

    let err = bridge.poll().await.unwrap_err();

    assert!(matches!(err, BridgeError::Unreachable { .. }), "got: {err:?}");
    assert_eq!(
        *bridge.connection_state().borrow(),
        ConnectionState::Unreachable
    );
    // The failed cycle counts against every slice.
    let snap = bridge.snapshot();
    assert_eq!(snap.system.availability, Availability::Stale);
    assert_eq!(snap.bus(BusId::Bus0).availability, Availability::Stale);
    assert_eq!(snap.bus(BusId::Bus1).availability, Availability::Stale);
}

#[tokio::test]
async fn test_system_endpoint_failure_degrades_the_system_slice() {
    let (server, bridge) = setup().await;
    mount_all_healthy(&server).await;
    bridge.poll().await.unwrap();
    assert!(bridge.snapshot().system.available());

    // The device stays reachable but the system endpoint starts
    // answering 500; both buses remain healthy.
    server.reset().await;
    mount_bus(&server, 0, true, 200).await;
    mount_bus(&server, 1, false, 0).await;
    Mock::given(method("GET"))
        .and(path("/api/system/status"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let snap = bridge.poll().await.unwrap();

    // Last-known system values survive, marked stale.
    assert_eq!(snap.system.availability, Availability::Stale);
    assert!(!snap.system.available());
    assert_eq!(snap.system.device_name, "RepelBridge");
    assert!(snap.bus(BusId::Bus0).available());
    assert!(snap.bus(BusId::Bus1).available());
    assert_eq!(
        *bridge.connection_state().borrow(),
        ConnectionState::Connected
    );

    // Same threshold as the buses: Offline after 3 consecutive failures,
    // one success recovers.
    bridge.poll().await.unwrap();
    bridge.poll().await.unwrap();
    assert_eq!(
        bridge.snapshot().system.availability,
        Availability::Offline
    );

    server.reset().await;
    mount_all_healthy(&server).await;
    bridge.poll().await.unwrap();
    assert!(bridge.snapshot().system.available());
    assert_eq!(bridge.snapshot().system.consecutive_failures, 0);
}

#[tokio::test]
async fn test_offline_after_threshold_then_recovery() {
    let (server, bridge) = setup().await;
    mount_system(&server).await;
    mount_bus(&server, 0, true, 50).await;
    Mock::given(method("GET"))
        .and(path("/api/bus/1/status"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    // Default threshold is 3 consecutive failures.
    for _ in 0..2 {
        bridge.poll().await.unwrap();
    }
    assert_eq!(
        bridge.snapshot().bus(BusId::Bus1).availability,
        Availability::Stale
    );

    bridge.poll().await.unwrap();
    assert_eq!(
        bridge.snapshot().bus(BusId::Bus1).availability,
        Availability::Offline
    );

    // Bus 0 was never affected.
    assert!(bridge.snapshot().bus(BusId::Bus0).available());

    // Device comes back: a single good poll restores the bus.
    server.reset().await;
    mount_all_healthy(&server).await;

    bridge.poll().await.unwrap();
    let bus1 = bridge.snapshot().bus(BusId::Bus1).clone();
    assert_eq!(bus1.availability, Availability::Online);
    assert_eq!(bus1.consecutive_failures, 0);
}

#[tokio::test]
async fn test_connect_runs_initial_poll() {
    let (server, bridge) = setup().await;
    mount_all_healthy(&server).await;

    bridge.connect().await.unwrap();

    assert_eq!(
        *bridge.connection_state().borrow(),
        ConnectionState::Connected
    );
    assert!(bridge.snapshot().last_refresh.is_some());

    bridge.shutdown().await;
    assert_eq!(
        *bridge.connection_state().borrow(),
        ConnectionState::Disconnected
    );
}

#[tokio::test]
async fn test_connect_fails_when_controller_is_down() {
    let bridge = Bridge::new(BridgeConfig {
        host: "127.0.0.1".into(),
        port: 1,
        timeout: Duration::from_secs(2),
        poll_interval: Duration::ZERO,
        ..BridgeConfig::default()
    })
    .unwrap();

    let err = bridge.connect().await.unwrap_err();
    assert!(matches!(err, BridgeError::Unreachable { .. }), "got: {err:?}");
}

// ── Commands ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_set_power_posts_then_refreshes_the_bus() {
    let (server, bridge) = setup().await;
    mount_bus(&server, 1, true, 10).await;

    Mock::given(method("POST"))
        .and(path("/api/bus/1/power"))
        .and(body_string_contains("state=true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "powered": true })))
        .expect(1)
        .mount(&server)
        .await;

    bridge.set_power(BusId::Bus1, true).await.unwrap();

    // Targeted refresh populated the bus without a full poll.
    let snap = bridge.snapshot();
    assert!(snap.bus(BusId::Bus1).powered);
    assert!(snap.bus(BusId::Bus1).available());
    assert_eq!(
        snap.bus(BusId::Bus0).availability,
        Availability::Unknown
    );
}

#[tokio::test]
async fn test_set_brightness_clamps_255_to_device_max() {
    let (server, bridge) = setup().await;
    mount_bus(&server, 0, true, 254).await;

    Mock::given(method("POST"))
        .and(path("/api/bus/0/brightness"))
        .and(body_string_contains("value=254"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    bridge.set_brightness(BusId::Bus0, 255).await.unwrap();

    assert_eq!(bridge.snapshot().bus(BusId::Bus0).brightness, 254);
}

#[tokio::test]
async fn test_set_color_round_trip() {
    let (server, bridge) = setup().await;
    mount_bus(&server, 0, true, 10).await;

    Mock::given(method("POST"))
        .and(path("/api/bus/0/color"))
        .and(body_string_contains("red=255"))
        .and(body_string_contains("green=0"))
        .and(body_string_contains("blue=0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    bridge
        .set_color(BusId::Bus0, RgbColor::new(255, 0, 0))
        .await
        .unwrap();

    assert_eq!(
        bridge.snapshot().bus(BusId::Bus0).color,
        RgbColor::new(255, 0, 0)
    );
}

#[tokio::test]
async fn test_reset_cartridge_posts_to_one_bus_only() {
    let (server, bridge) = setup().await;
    mount_bus(&server, 0, true, 10).await;

    Mock::given(method("POST"))
        .and(path("/api/bus/0/cartridge/reset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "runtime_hours": 0 })))
        .expect(1)
        .mount(&server)
        .await;

    bridge.reset_cartridge(BusId::Bus0).await.unwrap();

    // Only bus 0 endpoints were ever touched.
    for request in server.received_requests().await.unwrap() {
        assert!(request.url.path().starts_with("/api/bus/0/"));
    }
}

#[tokio::test]
async fn test_command_http_failure_leaves_cached_state_alone() {
    let (server, bridge) = setup().await;
    mount_all_healthy(&server).await;
    bridge.poll().await.unwrap();

    server.reset().await;
    Mock::given(method("POST"))
        .and(path("/api/bus/0/power"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = bridge.set_power(BusId::Bus0, false).await.unwrap_err();

    assert!(
        matches!(err, BridgeError::Communication { .. }),
        "got: {err:?}"
    );
    // Cache still shows the last polled values.
    let bus0 = bridge.snapshot().bus(BusId::Bus0).clone();
    assert!(bus0.powered);
    assert_eq!(bus0.brightness, 200);
}

// ── Validation ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_out_of_range_input_never_reaches_the_network() {
    let (server, bridge) = setup().await;

    let brightness = bridge.set_brightness(BusId::Bus0, 300).await;
    let shutoff = bridge.set_auto_shutoff(BusId::Bus0, 961).await;
    let warn_low = bridge.set_cartridge_warning(BusId::Bus0, 0).await;
    let warn_high = bridge.set_cartridge_warning(BusId::Bus0, 1001).await;

    for result in [brightness, shutoff, warn_low, warn_high] {
        assert!(
            matches!(result, Err(BridgeError::Validation { .. })),
            "got: {result:?}"
        );
    }

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_boundary_values_are_accepted() {
    let (server, bridge) = setup().await;
    mount_bus(&server, 0, true, 10).await;

    Mock::given(method("POST"))
        .and(path("/api/bus/0/auto_shutoff"))
        .and(body_string_contains("\"minutes\":960"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/bus/0/warn_at"))
        .and(body_string_contains("\"hours\":1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    bridge.set_auto_shutoff(BusId::Bus0, 960).await.unwrap();
    bridge
        .set_cartridge_warning(BusId::Bus0, 1000)
        .await
        .unwrap();
}
