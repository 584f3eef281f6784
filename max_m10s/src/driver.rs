//! MAX-M10S device drivers.
//!
//! [`MaxM10s`] runs over a blocking [`crate::I2cTransport`], [`MaxM10sAsync`]
//! over an [`crate::AsyncI2cTransport`]. Both share [`DeviceState`] and follow
//! the same sequence:
//!
//! ```text
//! Uninitialized --init--> Initializing --both ACKs--> Ready
//!                              |
//!                              +--any failure--> Uninitialized
//!
//! Ready: Idle --command--> CommandSent --read--> Received --validate_response--> Idle
//! ```
//!
//! Nothing is retried internally. Every failure is returned to the caller.

mod asynch;
mod blocking;
mod state;

pub use asynch::MaxM10sAsync;
pub use blocking::MaxM10s;
pub use state::{DeviceState, Phase, State, ACK_FRAME_LEN};
