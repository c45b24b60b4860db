//! List and run a stored chamber profile.
//!
//! Demonstrates discovering the profiles programmed on the controller's
//! front panel, starting one by name, and monitoring the chamber while it
//! runs. Profiles are the right tool for long cycling sequences (thermal
//! shock, HALT-style step stress) that should survive the control PC
//! rebooting: the controller executes them autonomously.
//!
//! # Usage
//!
//! ```sh
//! cargo run -p chamberlib --example run_profile -- "Thermal Cycle A"
//! ```

use std::time::Duration;

use chamberlib::watlow::models::f4t;
use chamberlib::watlow::F4tBuilder;

const MONITOR_INTERVAL: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let wanted = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: run_profile <profile name>"))?;

    let host = "192.168.0.40";
    let chamber = F4tBuilder::new(f4t()).host(host).connect().await?;
    println!("Connected: {}", chamber.identity());

    // Probe the stored profiles and find the requested one.
    let profiles = chamber.profiles().await?;
    if profiles.is_empty() {
        anyhow::bail!("no profiles stored on this controller");
    }
    println!("\nStored profiles:");
    for (slot, name) in &profiles {
        println!("  {slot:>2}  {name}");
    }

    let slot = profiles
        .iter()
        .find(|(_, name)| name.as_str() == wanted)
        .map(|(slot, _)| *slot)
        .ok_or_else(|| anyhow::anyhow!("no profile named {wanted:?}"))?;

    println!("\nStarting profile {slot} ({wanted})...");
    chamber.select_profile(slot).await?;
    chamber.run_profile().await?;

    // Monitor until interrupted; Ctrl-C stops the profile before exit.
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = tokio::time::sleep(MONITOR_INTERVAL) => {
                let temp = chamber.get_temperature().await?;
                let setpoint = chamber.get_setpoint().await?;
                println!("air {temp:>7.2} C  setpoint {setpoint:>7.2} C");
            }
        }
    }

    println!("\nStopping profile...");
    chamber.stop_profile().await?;
    chamber.close().await?;

    Ok(())
}
