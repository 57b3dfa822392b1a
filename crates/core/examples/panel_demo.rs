//! Example walking through a settings-panel session against a temp config
//!
//! Run with: cargo run --package soundpanel-core --example panel_demo

use soundpanel_core::domain::{
    catalog, ConfigManager, ConfigStore, DeviceName, DriverApi,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("soundpanel_core=debug,info")
        .init();

    println!("=== Soundpanel State Model Demo ===\n");

    // 1. Load (or create) the config payload
    println!("1. Loading configuration...");
    let manager = ConfigManager::new("demo_config.json".into());
    let mut payload = manager.load().await;

    // Seed a device scan the way the enumeration source would
    payload.device_scan.set_devices(
        DriverApi::Mme,
        vec![
            DeviceName::from("Mic Input"),
            DeviceName::from("Speakers (Realtek)"),
            DeviceName::from("Line Output"),
        ],
    );
    payload.device_scan.set_devices(
        DriverApi::Asio,
        vec![DeviceName::from("Focusrite USB ASIO")],
    );
    println!("   ✓ Payload ready at {}", manager.config_path().display());

    // 2. Build the store from the audio section
    println!("\n2. Building the config store...");
    let mut store = ConfigStore::from_settings(&payload.audio);
    let mut changes = store.subscribe();
    println!(
        "   ✓ Driver {} with buffer size {}",
        store.driver_api(),
        store.buffer_size()
    );

    // 3. Resolve the catalog for the active API
    println!("\n3. Resolving device lists...");
    let resolved = catalog::resolve(store.driver_api(), &payload.device_scan);
    println!(
        "   ✓ {} devices, {} output candidates, unified: {}",
        resolved.all.len(),
        resolved.outputs.len(),
        resolved.unified
    );

    // 4. Apply user gestures
    println!("\n4. Applying user selections...");
    store.set_buffer_size(512)?;
    store.set_last_output_device(DeviceName::from("Speakers (Realtek)"));
    while let Ok(event) = changes.try_recv() {
        println!("   ✓ Change notification: {event:?}");
    }

    // 5. Switch to ASIO and observe the unified list
    println!("\n5. Switching driver API to ASIO...");
    store.set_driver_api(DriverApi::Asio);
    let resolved = catalog::resolve(store.driver_api(), &payload.device_scan);
    println!("   ✓ Unified list: {:?}", resolved.all);

    // 6. Persist the updated payload
    println!("\n6. Saving configuration...");
    store.write_to(&mut payload.audio);
    manager.save(&payload).await?;
    println!("   ✓ Saved");

    Ok(())
}
