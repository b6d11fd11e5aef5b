//! The `nasfand` thermal control daemon for the NAS enclosure.
//!
//! Opens the serial channel to the enclosure microcontroller, lights the
//! power LED, and runs the hysteresis control loop until a termination
//! signal arrives. The loop itself is synchronous and single-threaded;
//! tokio is only the shell around it, watching for SIGINT/SIGTERM and
//! raising the shutdown flag the loop polls between cycles.
//!
//! On every exit path the failsafe guard inside the controller parks the
//! hardware: fan off, LED blinking.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use nasfan_control::Controller;
use nasfan_core::constants::CONTROL_PERIOD_SECS;
use nasfan_hardware::SerialTransport;

#[derive(Parser, Debug)]
#[command(name = "nasfand", version, about = "NAS enclosure fan control daemon")]
struct Args {
    /// Serial device connected to the enclosure microcontroller.
    #[arg(long, default_value = "/dev/ttyS1")]
    device: String,

    /// Control period in seconds.
    #[arg(long, default_value_t = CONTROL_PERIOD_SECS)]
    period: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    info!(device = %args.device, period = args.period, "starting nasfand");

    // A channel that cannot be opened is fatal; there is no retry.
    let transport = SerialTransport::open(&args.device)
        .with_context(|| format!("cannot open enclosure channel on {}", args.device))?;

    let shutdown = Arc::new(AtomicBool::new(false));
    spawn_signal_watcher(Arc::clone(&shutdown));

    let period = Duration::from_secs(args.period);
    let flag = Arc::clone(&shutdown);
    let worker = tokio::task::spawn_blocking(move || {
        let mut controller = Controller::new(transport).with_period(period);
        controller.start()?;
        controller.run(&flag)
        // Controller drops here: fan off, LED blink, on every path.
    });

    worker
        .await
        .context("control loop thread panicked")?
        .context("control loop failed")?;

    info!("nasfand stopped");
    Ok(())
}

/// Raise the shutdown flag on SIGINT or SIGTERM.
fn spawn_signal_watcher(shutdown: Arc<AtomicBool>) {
    tokio::spawn(async move {
        wait_for_termination().await;
        info!("termination signal received, requesting shutdown");
        shutdown.store(true, Ordering::Relaxed);
    });
}

#[cfg(unix)]
async fn wait_for_termination() {
    use tokio::signal::unix::{SignalKind, signal as unix_signal};

    match unix_signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = signal::ctrl_c() => {}
                _ = sigterm.recv() => {}
            }
        }
        Err(e) => {
            warn!(error = %e, "cannot listen for SIGTERM, falling back to SIGINT only");
            let _ = signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_termination() {
    let _ = signal::ctrl_c().await;
}
