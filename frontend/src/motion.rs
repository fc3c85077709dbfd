//! Frame-driven value animation: easing curves, progressions and the
//! gates that keep event bursts and repeat triggers in check.

pub mod easing;
pub mod gate;
pub mod progression;

pub use easing::Easing;
pub use gate::{FrameGate, Latest, OnceSet, Ticket};
pub use progression::{run, run_exclusive, Frame, FrameScheduler, Progression};
