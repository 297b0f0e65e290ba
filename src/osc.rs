//! Sine wave oscillator: phase accumulator and per-sample stepping.
//!
//! Pure logic, no hardware dependencies, fully testable on host. The
//! intended call sequence per sampling tick is `output()` then `step()`;
//! parameters may be changed between ticks at any moment and the generator
//! keeps producing a phase-correct wave.

use crate::fixed::{Sq015, Uq016};
use crate::smooth::{Schedule, Smoother};
use crate::trig::modulated_sine;

/// Highest allowed phase increment per sample: a quarter turn, i.e. the
/// Nyquist limit Fo = Fs/2 of the generated frequency.
pub const FREQ_MAX: u16 = 0x4000;

/// Fixed-point sine wave generator.
///
/// State is the phase increment per sample (`freq`), the wrapped momentary
/// phase (`phi`), the attenuation factor (`att`) and the smoothing
/// sub-state owned by the quantization smoother. A single instance is
/// exclusively owned by its caller; independent oscillators share nothing
/// but the immutable lookup tables.
///
/// # Example
///
/// ```
/// use fixsine::{Oscillator, Uq016};
///
/// let mut gen = Oscillator::new();
/// gen.set_frequency(Uq016::from_bits(0x0100));
/// let first = gen.output();
/// gen.step();
/// assert_eq!(first.bits(), 0); // phase starts at zero
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Oscillator {
    freq: Uq016,
    phi: Uq016,
    att: Uq016,
    smoother: Smoother,
}

impl Default for Oscillator {
    fn default() -> Self {
        Self::new()
    }
}

impl Oscillator {
    /// New oscillator in the zeroed, paused state: `freq = 0`, `phi = 0`,
    /// `att = 0`, smoothing enabled with no schedule.
    pub const fn new() -> Self {
        Oscillator {
            freq: Uq016::ZERO,
            phi: Uq016::ZERO,
            att: Uq016::ZERO,
            smoother: Smoother::new(),
        }
    }

    /// Set the phase increment per sample. Zero pauses the generator.
    ///
    /// # Panics
    ///
    /// Panics if `freq` exceeds a quarter turn per sample ([`FREQ_MAX`]),
    /// the Nyquist limit. Validation happens before any state mutation.
    pub fn set_frequency(&mut self, freq: Uq016) {
        assert!(freq.bits() <= FREQ_MAX, "frequency above Fs/2");
        self.freq = freq;
        self.rebuild();
    }

    /// Set the momentary phase, [0.0; 1.0) of a turn.
    pub fn set_phase(&mut self, phi: Uq016) {
        self.phi = phi;
        self.rebuild();
    }

    /// Set the attenuation factor; the output amplitude is `1 - att`.
    pub fn set_attenuation(&mut self, att: Uq016) {
        self.att = att;
        self.rebuild();
    }

    /// Enable or disable the quantization smoother.
    ///
    /// Disabled, the generator emits the direct trigonometric evaluation
    /// for every sample. Enabled (the default), single-unit plateau
    /// transitions are spread over a tiled pattern.
    pub fn set_smoothing(&mut self, enabled: bool) {
        self.smoother.set_enabled(enabled);
        self.rebuild();
    }

    /// Current phase increment per sample.
    #[inline]
    pub fn frequency(&self) -> Uq016 {
        self.freq
    }

    /// Current momentary phase.
    #[inline]
    pub fn phase(&self) -> Uq016 {
        self.phi
    }

    /// Current attenuation factor.
    #[inline]
    pub fn attenuation(&self) -> Uq016 {
        self.att
    }

    /// Current smoothing schedule (for inspection and tests).
    pub fn schedule(&self) -> Schedule {
        self.smoother.schedule()
    }

    /// Momentary output sample for the current phase.
    ///
    /// With an active smoothing schedule the value comes from the
    /// precomputed tiling pattern; otherwise it is `modulated_sine(phi,
    /// att)` evaluated directly. Calling `output` does not mutate state.
    #[inline]
    pub fn output(&self) -> Sq015 {
        match self.smoother.value() {
            Some(v) => v,
            None => modulated_sine(self.phi, self.att),
        }
    }

    /// Advance one sampling tick.
    ///
    /// Paused (`freq == 0`) this is a no-op: neither phase nor schedule
    /// changes. Otherwise the phase advances modulo one turn and the
    /// smoother is notified; reaching the schedule's right boundary retires
    /// the current interval and triggers the next lookahead.
    #[inline]
    pub fn step(&mut self) {
        if self.freq.bits() == 0 {
            return;
        }
        self.phi = self.phi.wrapping_add(self.freq);
        self.smoother.advance(self.freq, self.phi, self.att);
    }

    /// Recompute the smoothing schedule after a parameter change.
    fn rebuild(&mut self) {
        self.smoother.rebuild(self.freq, self.phi, self.att);
    }
}
