//! The control-loop runner.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use nasfan_core::LedState;
use nasfan_core::constants::CONTROL_PERIOD_SECS;
use nasfan_hardware::driver;
use nasfan_hardware::transport::FrameTransport;
use nasfan_hardware::Result;

use crate::failsafe::Failsafe;
use crate::state::ControlState;

/// How often the inter-cycle sleep rechecks the shutdown flag.
const SHUTDOWN_POLL: Duration = Duration::from_millis(250);

/// Samples the chassis temperature at a fixed cadence and drives the fan.
///
/// The controller is the sole user of the serial channel for the whole
/// process lifetime; no other logical flow touches the device, which is
/// why the loop needs no locking. It owns the transport through a
/// [`Failsafe`] guard, so the shutdown sequence (fan off, LED blink) runs
/// on every exit path, including panics.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::AtomicBool;
/// use nasfan_control::Controller;
/// use nasfan_hardware::MockTransport;
///
/// let (transport, handle) = MockTransport::new();
/// let mut controller = Controller::new(transport);
///
/// let shutdown = AtomicBool::new(true);
/// controller.run(&shutdown).unwrap();
/// drop(controller);
///
/// // The failsafe parked the hardware on the way out.
/// assert_eq!(handle.written().len(), 2);
/// ```
pub struct Controller<T: FrameTransport> {
    transport: Failsafe<T>,
    state: ControlState,
    period: Duration,
}

impl<T: FrameTransport> Controller<T> {
    /// Wrap a transport in a controller with the standard 20 s period.
    pub fn new(transport: T) -> Self {
        Self {
            transport: Failsafe::new(transport),
            state: ControlState::new(),
            period: Duration::from_secs(CONTROL_PERIOD_SECS),
        }
    }

    /// Override the sampling period (tests and bring-up only).
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Startup contract: light the power LED before the first cycle.
    ///
    /// # Errors
    ///
    /// Returns an error on a channel fault; at startup that is fatal.
    pub fn start(&mut self) -> Result<()> {
        driver::set_power_led(self.transport.transport(), LedState::On)?;
        info!("controller started, power LED on");
        Ok(())
    }

    /// Run control cycles until the shutdown flag is raised.
    ///
    /// Every per-cycle fault is absorbed here: a transport fault or an
    /// unavailable reading is logged and the loop proceeds to the next
    /// cycle with the state untouched. Only the shutdown flag ends the
    /// loop.
    pub fn run(&mut self, shutdown: &AtomicBool) -> Result<()> {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                info!("shutdown requested, leaving control loop");
                return Ok(());
            }
            self.cycle();
            self.sleep_until_next_cycle(shutdown);
        }
    }

    /// Execute one control cycle: sample, decide, command.
    ///
    /// Public so tests can step the loop without real time passing.
    pub fn cycle(&mut self) {
        match driver::read_temperature(self.transport.transport()) {
            Ok(Some(temp)) => {
                debug!(
                    temp,
                    speed = self.state.speed().map(|s| s.as_u8()),
                    "temperature sampled"
                );
                if let Some(step) = self.state.plan(temp) {
                    match driver::set_fan_speed(self.transport.transport(), step) {
                        Ok(step) => info!(%step, temp, "fan speed commanded"),
                        // The planned step stays committed; the device is
                        // commanded again as soon as the channel recovers.
                        Err(e) => warn!(error = %e, %step, "failed to command fan speed"),
                    }
                }
            }
            Ok(None) => warn!("temperature unavailable this cycle, holding state"),
            Err(e) => warn!(error = %e, "channel fault while sampling, holding state"),
        }
    }

    /// Read access to the control state, for tests and diagnostics.
    pub fn state(&self) -> &ControlState {
        &self.state
    }

    fn sleep_until_next_cycle(&self, shutdown: &AtomicBool) {
        let deadline = Instant::now() + self.period;
        loop {
            if shutdown.load(Ordering::Relaxed) {
                return;
            }
            let now = Instant::now();
            if now >= deadline {
                return;
            }
            thread::sleep(SHUTDOWN_POLL.min(deadline - now));
        }
    }
}
