//! RAII guard that parks the hardware on the way out.

use tracing::{info, warn};

use nasfan_core::{FanStep, LedState};
use nasfan_hardware::driver;
use nasfan_hardware::transport::FrameTransport;

/// Owns the transport and guarantees the shutdown sequence.
///
/// On drop, whether by normal return, error propagation or panic
/// unwinding, the guard commands fan step 0 and puts the LED into its
/// blinking "fan unmanaged" state. Both commands are best-effort: a dying
/// channel must not turn shutdown into a second failure.
///
/// Wrap the transport in a `Failsafe` before the first control cycle and
/// keep it wrapped for the life of the loop.
#[derive(Debug)]
pub struct Failsafe<T: FrameTransport> {
    transport: T,
}

impl<T: FrameTransport> Failsafe<T> {
    /// Arm the guard around a transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Borrow the guarded transport for driver calls.
    pub fn transport(&mut self) -> &mut T {
        &mut self.transport
    }
}

impl<T: FrameTransport> Drop for Failsafe<T> {
    fn drop(&mut self) {
        if let Err(e) = driver::set_fan_speed(&mut self.transport, FanStep::MIN) {
            warn!(error = %e, "failed to stop fan during shutdown");
        }
        if let Err(e) = driver::set_power_led(&mut self.transport, LedState::Blink) {
            warn!(error = %e, "failed to set shutdown LED state");
        }
        info!("failsafe shutdown sequence issued");
    }
}
