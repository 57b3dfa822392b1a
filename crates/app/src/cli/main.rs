//! Soundpanel CLI harness
//!
//! Headless stand-in for the audio settings panel: drives the core state
//! model against a real config file so device filtering and selection
//! restoration can be exercised without a UI.

use clap::{Parser, Subcommand};
use soundpanel_core::domain::{
    catalog, ConfigManager, ConfigStore, DeviceName, DriverApi, ResolvedDevices,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "soundpanel")]
#[command(about = "Test harness for the audio settings state model", long_about = None)]
struct Cli {
    /// Config file path (defaults to the per-user config location)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show the active driver, buffer size, and resolved device lists
    Show,
    /// Switch the driver API (mme, asio, wasapi)
    SetApi { api: DriverApi },
    /// Set the buffer size in frames
    SetBuffer { size: u32 },
    /// Remember an input device
    SetInput { name: String },
    /// Remember an output device
    SetOutput { name: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .init();
    }

    let config_path = match cli.config {
        Some(path) => path,
        None => ConfigManager::default_config_path()?,
    };
    let manager = ConfigManager::new(config_path);

    let mut payload = manager.load().await;
    let mut store = ConfigStore::from_settings(&payload.audio);
    let mut changes = store.subscribe();

    match cli.command.unwrap_or(Command::Show) {
        Command::Show => {
            let resolved = catalog::resolve(store.driver_api(), &payload.device_scan);
            print_panel(&store, &resolved);
            return Ok(());
        }
        Command::SetApi { api } => {
            store.set_driver_api(api);
            let resolved = catalog::resolve(api, &payload.device_scan);
            print_panel(&store, &resolved);
        }
        Command::SetBuffer { size } => {
            store.set_buffer_size(size)?;
            println!("Buffer size set to {size}");
        }
        Command::SetInput { name } => {
            store.set_last_input_device(DeviceName::new(name));
        }
        Command::SetOutput { name } => {
            store.set_last_output_device(DeviceName::new(name));
        }
    }

    while let Ok(event) = changes.try_recv() {
        tracing::debug!(?event, "Config changed");
    }

    store.write_to(&mut payload.audio);
    manager.save(&payload).await?;

    Ok(())
}

fn print_panel(store: &ConfigStore, resolved: &ResolvedDevices) {
    println!("Driver:      {}", store.driver_api());
    println!("Buffer size: {}", store.buffer_size());

    if resolved.all.is_empty() {
        println!("No devices scanned for {}", store.driver_api());
        return;
    }

    if resolved.unified {
        let restored = resolved.restore_input(store.last_input_device());
        println!("Interface:");
        for device in &resolved.all {
            println!("  {} {}", marker(restored, device), device);
        }
    } else {
        let restored_in = resolved.restore_input(store.last_input_device());
        println!("Input:");
        for device in &resolved.all {
            println!("  {} {}", marker(restored_in, device), device);
        }

        let restored_out = resolved.restore_output(store.last_output_device());
        println!("Output:");
        for device in &resolved.outputs {
            println!("  {} {}", marker(restored_out, device), device);
        }
    }
}

fn marker(restored: Option<&DeviceName>, device: &DeviceName) -> &'static str {
    if restored == Some(device) {
        "*"
    } else {
        " "
    }
}
