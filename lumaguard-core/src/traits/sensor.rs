//! Frame Source Trait
//!
//! A [`Sensor`] yields frames using the pull-based, non-blocking model of
//! the `nb` crate:
//!
//! - `Ok(frame)`: next frame ready
//! - `Err(nb::Error::WouldBlock)`: nothing yet, poll again
//! - `Err(nb::Error::Other(e))`: fatal; the loop stops and releases the sensor
//!
//! ```rust
//! use lumaguard_core::{LumaFrame, Sensor, SensorError};
//!
//! struct StillImage {
//!     pixels: Vec<u8>,
//!     remaining: usize,
//! }
//!
//! struct Owned(Vec<u8>);
//!
//! impl lumaguard_core::AsLuma for Owned {
//!     fn as_luma(&self) -> LumaFrame<'_> {
//!         LumaFrame::new(4, 4, &self.0).expect("4x4 buffer")
//!     }
//! }
//!
//! impl Sensor for StillImage {
//!     type Frame = Owned;
//!
//!     fn read(&mut self) -> nb::Result<Owned, SensorError> {
//!         if self.remaining == 0 {
//!             return Err(nb::Error::Other(SensorError::EndOfStream));
//!         }
//!         self.remaining -= 1;
//!         Ok(Owned(self.pixels.clone()))
//!     }
//! }
//!
//! let mut sensor = StillImage { pixels: vec![40; 16], remaining: 1 };
//! let frame = nb::block!(sensor.read()).unwrap();
//! assert_eq!(sensor.current_brightness(&frame), 40.0);
//! assert!(sensor.read().is_err());
//! ```

use crate::{engine::TickReport, errors::SensorError, frame::AsLuma};

/// Source of frames
pub trait Sensor {
    /// Captured frame type
    type Frame: AsLuma;

    /// Attempt to acquire the next frame
    ///
    /// ## Contract
    ///
    /// - Must not block indefinitely when returning `WouldBlock`
    /// - `EndOfStream` is sticky: once returned, every later call returns it
    fn read(&mut self) -> nb::Result<Self::Frame, SensorError>;

    /// Scene brightness of `frame` (mean luminance by default)
    fn current_brightness(&self, frame: &Self::Frame) -> f32 {
        frame.as_luma().mean_luminance()
    }

    /// Show the frame together with the tick outcome
    ///
    /// Default does nothing, for headless deployments.
    fn display(&mut self, _frame: &Self::Frame, _report: &TickReport) {}

    /// Release the device
    ///
    /// Called once when the driving loop's run ends, on every exit path.
    /// The loop never reads the sensor afterwards.
    fn release(&mut self) {}
}
