//! Hot/cold temperature cycling with soak periods.
//!
//! Demonstrates driving a chamber through repeated hot/cold cycles from
//! the control PC rather than a stored profile. Each cycle steps to the
//! hot extreme, soaks, steps to the cold extreme, and soaks again. This
//! is the classic accelerated-aging loop for solder joint and package
//! stress screening.
//!
//! For long runs that must survive the control PC, prefer a stored
//! profile (see the `run_profile` example); this loop is for short
//! interactive runs where cycle count or extremes change per part.
//!
//! # Usage
//!
//! ```sh
//! cargo run -p chamberlib --example cycle_soak
//! ```

use std::time::{Duration, Instant};

use chamberlib::watlow::models::f4t;
use chamberlib::watlow::{F4t, F4tBuilder};
use chamberlib::RampAction;

/// Cycle parameters.
const HOT: f64 = 85.0;
const COLD: f64 = -40.0;
const CYCLES: u32 = 10;
const TOLERANCE: f64 = 0.2; // degrees
const SOAK: Duration = Duration::from_secs(10 * 60);
const POLL_INTERVAL: Duration = Duration::from_secs(5);
const SETTLE_LIMIT: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let host = "192.168.0.40";
    let chamber = F4tBuilder::new(f4t()).host(host).connect().await?;
    println!("Connected: {}", chamber.identity());

    chamber.set_ramp_action(RampAction::Off).await?;

    for cycle in 1..=CYCLES {
        println!("cycle {cycle}/{CYCLES}: hot extreme {HOT} C");
        step_and_soak(&chamber, HOT).await?;

        println!("cycle {cycle}/{CYCLES}: cold extreme {COLD} C");
        step_and_soak(&chamber, COLD).await?;
    }

    println!("Cycling complete, returning to 25.0 C");
    chamber.set_setpoint(25.0).await?;
    chamber.close().await?;
    Ok(())
}

/// Drive the chamber to `target`, wait for it to settle, then soak.
async fn step_and_soak(chamber: &F4t, target: f64) -> anyhow::Result<()> {
    chamber.set_setpoint(target).await?;

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

    println!(
        "  settled at {target} C after {:.0} s, soaking {:.0} s",
        start.elapsed().as_secs_f64(),
        SOAK.as_secs_f64()
    );
    tokio::time::sleep(SOAK).await;
    Ok(())
}
