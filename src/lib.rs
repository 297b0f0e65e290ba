//! # fixsine
//!
//! Fixed-point sine wave oscillator for platforms without floating-point
//! arithmetic.
//!
//! ## Architecture
//!
//! The crate is a pure computational state machine consumed via direct calls:
//! - [`fixed`] — bit-exact conversions between fixed-point formats
//! - [`trig`] — quarter-period sine lookup with linear interpolation
//! - [`osc`] — phase accumulator and per-sample stepping
//! - [`smooth`] — plateau-transition smoothing for coarse amplitude output
//!
//! No I/O, no heap, no unsafe. All modules are hardware-free and fully
//! testable on host.
//!
//! ## Example
//!
//! ```
//! use fixsine::{Oscillator, Uq016};
//!
//! let mut gen = Oscillator::new();
//! gen.set_frequency(Uq016::from_bits(4));        // Fo = Fs * 4/65536
//! gen.set_attenuation(Uq016::from_bits(65528));  // amplitude 1/8192
//!
//! for _ in 0..100 {
//!     let _sample = gen.output();
//!     gen.step();
//! }
//! ```

#![cfg_attr(not(test), no_std)]

pub mod fixed;
pub mod lut;
pub mod osc;
pub mod smooth;
pub mod trig;

pub use fixed::{Sq015, Sq021, Uq016, Uq022};
pub use osc::Oscillator;
pub use smooth::Schedule;
pub use trig::{modulated_sine, quarter_sine};
