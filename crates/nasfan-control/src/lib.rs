//! The hysteresis control loop that keeps the enclosure in its thermal
//! band.
//!
//! # Components
//!
//! - [`ControlState`] is the pure decision core: given the last sampled
//!   temperature, apply the first-match rule ladder and produce the next
//!   fan speed step, if any. No I/O and fully deterministic, so it is
//!   exhaustively testable.
//! - [`Controller`] is the runner: it samples the device every 20 seconds,
//!   feeds readings into the state, commands the fan, and absorbs every
//!   per-cycle fault so the loop never dies.
//! - [`Failsafe`] is the RAII guard that parks the hardware (fan off, LED
//!   blinking) on every exit path, panics included.
//!
//! # Fault handling
//!
//! Faults below this crate never escape a cycle: a channel fault or an
//! unavailable reading is logged and the cycle is skipped with the state
//! left exactly as it was. The fan is never unmanaged for more than one
//! period.

pub mod controller;
pub mod failsafe;
pub mod state;

pub use controller::Controller;
pub use failsafe::Failsafe;
pub use state::ControlState;
