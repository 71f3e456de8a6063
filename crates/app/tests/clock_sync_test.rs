//! End-to-end tests: real HTTP adapter against a mocked time server,
//! driven through the clock service

use anyhow::Result;
use chrono::DateTime;
use mockito::{Matcher, Server};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::mpsc;
use tzclock::adapters::http_api::HttpTimeApi;
use tzclock::adapters::persistence::FileConfigStore;
use tzclock::services::clock_service::{ClockService, ServiceUpdate};
use tzclock_core::app::Command;
use tzclock_core::domain::{CatalogSource, Event, ReadingSource, SyncState};
use tzclock_core::ports::{AppConfig, ConfigStore, FixedClock, Silent};

fn build_service(server_url: &str, temp_dir: &TempDir) -> Result<(ClockService, mpsc::UnboundedReceiver<Event>)> {
    let mut config = AppConfig::default();
    config.server_url = server_url.to_string();
    config.sync.resync_interval_secs = 3600;

    let api = Arc::new(HttpTimeApi::new(server_url, std::time::Duration::from_secs(5))?);
    let now = DateTime::parse_from_rfc3339("2024-06-01T12:00:00+00:00")?;
    let store = Arc::new(FileConfigStore::with_path(temp_dir.path().join("tzclock.toml")));

    Ok(ClockService::new(api, Arc::new(FixedClock(now)), store, Arc::new(Silent), config))
}

/// Feed events to the service until one produces an update matching `pred`
async fn drive_until(
    service: &mut ClockService,
    rx: &mut mpsc::UnboundedReceiver<Event>,
    pred: impl Fn(&Event) -> bool,
) -> ServiceUpdate {
    loop {
        let event = rx.recv().await.expect("event channel closed");
        let wanted = pred(&event);
        let update = service.handle_event(event);
        if wanted {
            return update;
        }
    }
}

#[tokio::test]
async fn test_london_renders_server_time_then_ticks() -> Result<()> {
    let mut server = Server::new_async().await;
    let time_mock = server
        .mock("GET", "/api/time")
        .match_query(Matcher::UrlEncoded("zone".into(), "Europe/London".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"success","timestamp":1700000000,"gmtOffset":0}"#)
        .create_async()
        .await;

    let temp_dir = TempDir::new()?;
    let (mut service, mut rx) = build_service(&server.url(), &temp_dir)?;

    let update = service.handle_command(Command::SelectZone { zone: "Europe/London".to_string() });
    let ServiceUpdate::Frame(initial) = update else {
        panic!("selecting a zone should render");
    };
    assert_eq!(initial.sync, SyncState::Unsynced);

    let update = drive_until(&mut service, &mut rx, |e| matches!(e, Event::TimeFetched { .. })).await;
    let ServiceUpdate::Frame(synced) = update else {
        panic!("successful fetch should render");
    };
    assert_eq!(synced.reading.source, ReadingSource::Authoritative);
    assert_eq!(synced.display.time_text(), "22:13:20");
    assert_eq!(synced.display.date, "Tuesday, 14 November 2023");
    assert_eq!(synced.reading.offset_label(), "UTC+00:00");

    let update = drive_until(&mut service, &mut rx, |e| matches!(e, Event::Tick { .. })).await;
    let ServiceUpdate::Frame(ticked) = update else {
        panic!("tick should render");
    };
    assert_eq!(ticked.display.time_text(), "22:13:21");
    assert_eq!(service.engine().state().authoritative_timestamp, Some(1_700_000_001));

    time_mock.assert_async().await;
    service.shutdown();
    Ok(())
}

#[tokio::test]
async fn test_malformed_time_payload_falls_back_to_zone_rules() -> Result<()> {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/time")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"status":"success","timestamp":"not-a-number"}"#)
        .create_async()
        .await;

    let temp_dir = TempDir::new()?;
    let (mut service, mut rx) = build_service(&server.url(), &temp_dir)?;
    service.select_zone("Asia/Tokyo".to_string());

    let update = drive_until(&mut service, &mut rx, |e| matches!(e, Event::TimeFetched { .. })).await;
    assert_eq!(update, ServiceUpdate::Nothing);

    let update = drive_until(&mut service, &mut rx, |e| matches!(e, Event::Tick { .. })).await;
    let ServiceUpdate::Frame(frame) = update else {
        panic!("tick should render");
    };
    assert_eq!(frame.sync, SyncState::Unsynced);
    assert_eq!(frame.reading.source, ReadingSource::ZoneRules);
    assert_eq!(frame.display.time_text(), "21:00:00");

    service.shutdown();
    Ok(())
}

#[tokio::test]
async fn test_zone_list_failure_yields_builtin_list() -> Result<()> {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/timezones")
        .with_status(500)
        .create_async()
        .await;

    let temp_dir = TempDir::new()?;
    let (mut service, mut rx) = build_service(&server.url(), &temp_dir)?;
    service.handle_command(Command::ReloadZones);

    let update = drive_until(&mut service, &mut rx, |e| matches!(e, Event::ZonesLoaded { .. })).await;
    let ServiceUpdate::Zones(catalog) = update else {
        panic!("zone list should be delivered");
    };
    assert_eq!(catalog.source, CatalogSource::Fallback);
    assert_eq!(catalog.entries.len(), 5);
    Ok(())
}

#[tokio::test]
async fn test_empty_zone_list_yields_builtin_list() -> Result<()> {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/timezones")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let temp_dir = TempDir::new()?;
    let (mut service, mut rx) = build_service(&server.url(), &temp_dir)?;
    service.handle_command(Command::ReloadZones);

    let update = drive_until(&mut service, &mut rx, |e| matches!(e, Event::ZonesLoaded { .. })).await;
    let ServiceUpdate::Zones(catalog) = update else {
        panic!("zone list should be delivered");
    };
    assert_eq!(catalog.source, CatalogSource::Fallback);
    assert_eq!(catalog.entries.len(), 5);
    Ok(())
}

#[tokio::test]
async fn test_tick_sound_toggle_written_to_settings_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let (mut service, _rx) = build_service("http://127.0.0.1:9", &temp_dir)?;

    service.handle_command(Command::ToggleTickSound);

    let store = FileConfigStore::with_path(temp_dir.path().join("tzclock.toml"));
    let stored = store.load()?;
    assert!(stored.display.tick_sound);
    // The test's server URL was never written; only the flag is persisted
    assert_eq!(stored.server_url, AppConfig::default().server_url);
    Ok(())
}
