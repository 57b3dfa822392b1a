//! Integration tests for the settings panel control flow
//!
//! These exercise the path a UI layer takes: load the payload, build the
//! store, resolve the catalog for the active API, restore prior selections,
//! apply user changes, and save the payload back.

use soundpanel_core::domain::{
    catalog, ChangeEvent, ConfigManager, ConfigPayload, ConfigStore, DeviceListing, DeviceName,
    DriverApi,
};
use tempfile::TempDir;

fn scanned_listing() -> DeviceListing {
    let mut listing = DeviceListing::new();
    listing.set_devices(
        DriverApi::Mme,
        vec![
            DeviceName::from("Mic Input"),
            DeviceName::from("Speakers (Realtek)"),
            DeviceName::from("Line Output"),
        ],
    );
    listing.set_devices(
        DriverApi::Asio,
        vec![
            DeviceName::from("Focusrite USB ASIO"),
            DeviceName::from("ASIO4ALL v2"),
        ],
    );
    listing
}

#[test]
fn restores_prior_output_when_still_listed() {
    let mut store = ConfigStore::default();
    store.set_last_output_device(DeviceName::from("Line Output"));

    let resolved = catalog::resolve(store.driver_api(), &scanned_listing());
    assert_eq!(
        resolved.outputs,
        vec![
            DeviceName::from("Speakers (Realtek)"),
            DeviceName::from("Line Output"),
        ]
    );

    let restored = resolved.restore_output(store.last_output_device());
    assert_eq!(restored, Some(&DeviceName::from("Line Output")));
}

#[test]
fn skips_stale_output_without_error() {
    let mut store = ConfigStore::default();
    store.set_last_output_device(DeviceName::from("USB Interface"));

    let resolved = catalog::resolve(store.driver_api(), &scanned_listing());
    assert_eq!(resolved.restore_output(store.last_output_device()), None);

    // the stored value itself is untouched; it may become valid again later
    assert_eq!(store.last_output_device().as_str(), "USB Interface");
}

#[test]
fn switching_to_asio_presents_one_unified_selector() {
    let listing = scanned_listing();
    let mut store = ConfigStore::default();

    let resolved = catalog::resolve(store.driver_api(), &listing);
    assert!(!resolved.unified);

    store.set_driver_api(DriverApi::Asio);
    let resolved = catalog::resolve(store.driver_api(), &listing);
    assert!(resolved.unified);
    assert_eq!(resolved.outputs, resolved.all);
    assert_eq!(resolved.all.len(), 2);
}

#[test]
fn each_user_gesture_notifies_subscribers() {
    let mut store = ConfigStore::default();
    let mut rx = store.subscribe();

    store.set_driver_api(DriverApi::Wasapi);
    store.set_buffer_size(1024).unwrap();
    store.set_last_input_device(DeviceName::from("Mic Input"));

    assert_eq!(
        rx.try_recv().unwrap(),
        ChangeEvent::DriverApiChanged(DriverApi::Wasapi)
    );
    assert_eq!(rx.try_recv().unwrap(), ChangeEvent::BufferSizeChanged(1024));
    assert_eq!(
        rx.try_recv().unwrap(),
        ChangeEvent::InputDeviceChanged(DeviceName::from("Mic Input"))
    );
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn full_panel_session_round_trips_through_disk() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ConfigManager::new(temp_dir.path().join("config.json"));

    // first launch: no file, defaults
    let mut payload = manager.load().await;
    payload.device_scan = scanned_listing();

    let mut store = ConfigStore::from_settings(&payload.audio);
    assert_eq!(store.driver_api(), DriverApi::Mme);
    assert_eq!(store.buffer_size(), 256);

    // user picks a buffer size and an output, panel saves
    store.set_buffer_size(512).unwrap();
    store.set_last_output_device(DeviceName::from("Speakers (Realtek)"));
    store.write_to(&mut payload.audio);
    manager.save(&payload).await.unwrap();

    // relaunch: selections come back and are restorable against the scan
    let payload = manager.load().await;
    let store = ConfigStore::from_settings(&payload.audio);
    assert_eq!(store.buffer_size(), 512);

    let resolved = catalog::resolve(store.driver_api(), &payload.device_scan);
    assert_eq!(
        resolved.restore_output(store.last_output_device()),
        Some(&DeviceName::from("Speakers (Realtek)"))
    );
}

#[tokio::test]
async fn saved_payload_keeps_documented_json_shape() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    let manager = ConfigManager::new(path.clone());

    let mut payload = ConfigPayload::default();
    payload.device_scan = scanned_listing();
    payload.audio.api = DriverApi::Asio;
    payload.audio.last_input_device = DeviceName::from("Focusrite USB ASIO");
    manager.save(&payload).await.unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(json["audio"]["api"], 1);
    assert_eq!(json["audio"]["bufferSize"], 256);
    assert_eq!(json["audio"]["lastInputDevice"], "Focusrite USB ASIO");
    assert_eq!(json["audio"]["lastOutputDevice"], "");
    assert_eq!(json["deviceScan"]["mme"][0], "Mic Input");
}
