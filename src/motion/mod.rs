//! Motion module for the wear test.
//!
//! Provides the trapezoidal profile and the step executor that both motor
//! backends share, and with them the tick timing model.

mod executor;
mod profile;

pub use executor::MotionExecutor;
pub use profile::{MotionPhase, MotionProfile};
