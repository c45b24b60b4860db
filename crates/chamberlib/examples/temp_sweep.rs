//! Stepped temperature sweep with settling detection.
//!
//! Demonstrates walking a chamber through a list of temperature targets,
//! waiting at each step until the chamber air is within tolerance of the
//! setpoint, then holding for a soak period. This is the core loop of a
//! thermal characterization run: measure the device under test at each
//! plateau.
//!
//! The example sweeps -20, 0, 25, 55, and 85 degrees C with a 0.2 degree
//! settling tolerance and a 5 minute soak at each step.
//!
//! # Requirements
//!
//! - An F4T-based chamber reachable on the network
//! - Host address adjusted for your bench
//!
//! # Usage
//!
//! ```sh
//! cargo run -p chamberlib --example temp_sweep
//! ```

use std::time::{Duration, Instant};

use chamberlib::watlow::models::f4t;
use chamberlib::watlow::F4tBuilder;
use chamberlib::{RampAction, TemperatureUnits};

/// Sweep parameters.
const TARGETS: &[f64] = &[-20.0, 0.0, 25.0, 55.0, 85.0];
const TOLERANCE: f64 = 0.2; // degrees
const SOAK: Duration = Duration::from_secs(5 * 60);
const POLL_INTERVAL: Duration = Duration::from_secs(2);
const SETTLE_LIMIT: Duration = Duration::from_secs(45 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let host = "192.168.0.40";

    println!("Connecting to chamber at {host}...");

    let chamber = F4tBuilder::new(f4t()).host(host).connect().await?;
    println!("Connected: {}", chamber.identity());

    chamber.set_units(TemperatureUnits::Celsius).await?;
    // Step instantly between targets; settling is detected by polling.
    chamber.set_ramp_action(RampAction::Off).await?;

    println!("\n{:<10} {:>12} {:>12}", "Target", "Settled in", "Soak");
    println!("{:-<10} {:-<12} {:-<12}", "", "", "");

    for &target in TARGETS {
        chamber.set_setpoint(target).await?;

        // Poll until the chamber air reaches the target.
        let start = Instant::now();
        loop {
            if start.elapsed() > SETTLE_LIMIT {
                anyhow::bail!("chamber failed to reach {target} C within settle limit");
            }
            let reading = chamber.get_temperature().await?;
            if (reading - target).abs() <= TOLERANCE {
                break;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
        let settled = start.elapsed();

        // Hold at the plateau. A real bench would trigger DUT
        // measurements here.
        tokio::time::sleep(SOAK).await;

        println!(
            "{:>7.1} C {:>10.0} s {:>10.0} s",
            target,
            settled.as_secs_f64(),
            SOAK.as_secs_f64()
        );
    }

    // Park the chamber at ambient before disconnecting.
    println!("\nReturning to 25.0 C...");
    chamber.set_setpoint(25.0).await?;
    chamber.close().await?;

    Ok(())
}
