//! Plateau-transition smoothing for coarse amplitude output.
//!
//! At low frequency/amplitude ratios many consecutive phase values quantize
//! to the same SQ0.15 output (a plateau), and the change to the next plateau
//! is a single-sample jump of one quantization unit. The smoother spreads
//! that jump over a tiled pattern of samples straddling the transition, so
//! the output alternates between the old and the new value with gradually
//! shifting balance instead of switching abruptly. No emitted sample ever
//! deviates from the mathematically exact value by more than one unit.
//!
//! The schedule for one plateau-to-plateau interval is found by a bounded
//! lookahead scan and classified per-sample in O(1) from a handful of
//! derived indices; the full pattern is never stored.

use crate::fixed::{Sq015, Uq016};
use crate::trig::modulated_sine;

/// Upper bound on the phase distance covered by one lookahead scan.
///
/// A quarter turn: a quantized sine that does not change value within a
/// quarter period is not in a plateau regime worth smoothing (for example
/// when attenuation collapses the whole wave to zero).
const SCAN_PHASE_LIMIT: u32 = 0x4000;

/// Upper bound on the iteration count of one lookahead scan.
const SCAN_STEP_LIMIT: u16 = 0x4000;

/// Number of entries in the square-number table.
const SQUARE_LUT_SIZE: usize = 128;

/// Table of perfect squares `i*i`, covering square roots of inputs below
/// 0x4000. Immutable process-wide data.
static SQUARE_LUT: [u16; SQUARE_LUT_SIZE] = {
    let mut table = [0u16; SQUARE_LUT_SIZE];
    let mut i = 0;
    while i < SQUARE_LUT_SIZE {
        table[i] = (i * i) as u16;
        i += 1;
    }
    table
};

/// Integer square root, `floor(sqrt(x))`, for `x < 0x4000`.
///
/// Scans the square table for the first entry exceeding the input, then
/// backs off by one.
pub(crate) fn isqrt(x: u16) -> u16 {
    debug_assert!((x as usize) < SQUARE_LUT_SIZE * SQUARE_LUT_SIZE);

    let mut i = 1;
    while i < SQUARE_LUT_SIZE && SQUARE_LUT[i] <= x {
        i += 1;
    }
    (i - 1) as u16
}

/// Smoothing schedule for one plateau-to-plateau interval.
///
/// A tagged state: either no schedule is in effect, or one interval is
/// fully parameterized. Invalid field combinations are unrepresentable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schedule {
    /// No schedule: output is the direct trigonometric evaluation.
    Inactive,
    /// An interval is scheduled; `output` values come from the tiling
    /// pattern until `sidx` reaches the right boundary.
    Scheduled {
        /// Left boundary phase of the interval.
        phi0: Uq016,
        /// Quantized value on the left of the transition.
        val0: Sq015,
        /// Right boundary phase, `phi0 + sampl * freq` (mod 1.0).
        phi1: Uq016,
        /// Quantized value on the right of the transition; differs from
        /// `val0` by exactly one quantization unit.
        val1: Sq015,
        /// Interval length in samples.
        sampl: u16,
        /// Number of main tiling groups, `floor(sqrt(sampl))`, at least 2.
        steps: u16,
        /// Size of each main group, `sampl / steps`.
        msize: u16,
        /// Number of leftover samples, `sampl % steps`.
        asize: u16,
        /// Sample index within the interval, counted from `phi0`.
        sidx: u16,
        /// First index of the leftover block, `steps * msize`.
        aidx: u16,
        /// First index at which the value has settled to `val1` (the right
        /// boundary itself; retirement normally fires there).
        ridx: u16,
    },
}

/// Quantization smoother owned by the oscillator.
///
/// Holds the master enable switch, the current schedule and the last raw
/// quantized value (used to spot plateau boundaries while no schedule is
/// in effect).
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Smoother {
    enabled: bool,
    schedule: Schedule,
    last: Sq015,
}

impl Smoother {
    /// New smoother, enabled, with no schedule.
    pub(crate) const fn new() -> Self {
        Smoother {
            enabled: true,
            schedule: Schedule::Inactive,
            last: Sq015::from_bits(0),
        }
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub(crate) fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Discard any schedule and re-run the lookahead from the current
    /// generator parameters. Called after every parameter mutation: the
    /// transition schedule depends on all of frequency, phase and
    /// attenuation.
    pub(crate) fn rebuild(&mut self, freq: Uq016, phi: Uq016, att: Uq016) {
        self.last = modulated_sine(phi, att);
        self.schedule = if self.enabled && freq.bits() > 0 {
            lookahead(freq, phi, att)
        } else {
            Schedule::Inactive
        };
    }

    /// Value dictated by the active schedule, if any.
    pub(crate) fn value(&self) -> Option<Sq015> {
        match self.schedule {
            Schedule::Inactive => None,
            Schedule::Scheduled {
                val0,
                val1,
                msize,
                sidx,
                aidx,
                ridx,
                ..
            } => Some(pattern_value(val0, val1, msize, sidx, aidx, ridx)),
        }
    }

    /// Advance one sample past an already-stepped phase.
    ///
    /// Retires the interval when the right boundary is reached and chains
    /// straight into the next lookahead, so consecutive intervals tile the
    /// wave without gaps. While inactive, watches the raw value for the
    /// next plateau boundary: a fresh interval may be smoothable even if
    /// the previous scan gave up.
    pub(crate) fn advance(&mut self, freq: Uq016, phi: Uq016, att: Uq016) {
        if !self.enabled {
            return;
        }
        debug_assert!(freq.bits() > 0, "paused generator must not advance");

        match self.schedule {
            Schedule::Inactive => {
                let v = modulated_sine(phi, att);
                if v != self.last {
                    self.schedule = lookahead(freq, phi, att);
                }
                self.last = v;
            }
            Schedule::Scheduled { sidx, sampl, .. } if sidx + 1 >= sampl => {
                // Right boundary: val0 <- val1, phi0 <- phi1, rescan.
                self.last = modulated_sine(phi, att);
                self.schedule = lookahead(freq, phi, att);
            }
            Schedule::Scheduled { ref mut sidx, .. } => *sidx += 1,
        }
    }
}

/// Classify one sample index of a scheduled interval.
///
/// Layout of the interval, derived from `sampl = steps * msize + asize`:
/// - `[0, aidx)` — `steps` main groups of `msize` samples; group `k`
///   carries `k` new-valued samples as a trailing run, one extra per group,
///   its start sliding one slot earlier each group (a near-diagonal ramp
///   of the old/new balance from all-old towards all-new)
/// - `[aidx, ridx)` — the leftover block alternates old/new per sample
/// - `[ridx, ...)` — settled at the new value
#[inline]
fn pattern_value(val0: Sq015, val1: Sq015, msize: u16, sidx: u16, aidx: u16, ridx: u16) -> Sq015 {
    if sidx >= ridx {
        val1
    } else if sidx >= aidx {
        if (sidx - aidx) % 2 == 0 {
            val0
        } else {
            val1
        }
    } else {
        let group = sidx / msize;
        let pos = sidx % msize;
        // group < steps <= msize, so the subtraction cannot underflow.
        if pos >= msize - group {
            val1
        } else {
            val0
        }
    }
}

/// Scan forward from `from` in increments of `freq` until the quantized
/// value changes away from `current`.
///
/// Returns the step count, the phase of the first changed sample and its
/// value, or `None` when the scan exhausts its phase-distance or iteration
/// budget without finding a change.
fn scan_transition(
    from: Uq016,
    freq: Uq016,
    att: Uq016,
    current: Sq015,
) -> Option<(u16, Uq016, Sq015)> {
    let mut phi = from;
    let mut advance: u32 = 0;
    let mut cnt: u16 = 0;

    loop {
        phi = phi.wrapping_add(freq);
        advance += freq.bits() as u32;
        cnt += 1;
        if advance > SCAN_PHASE_LIMIT || cnt > SCAN_STEP_LIMIT {
            return None;
        }
        let v = modulated_sine(phi, att);
        if v != current {
            return Some((cnt, phi, v));
        }
    }
}

/// Locate the next plateau transition and build its smoothing schedule.
///
/// Aborts to `Inactive` (a defined fallback, not an error) when:
/// - either bounded scan finds no transition,
/// - the transition magnitude exceeds one quantization unit,
/// - the interval is too short to tile (`steps < 2`).
fn lookahead(freq: Uq016, phi0: Uq016, att: Uq016) -> Schedule {
    debug_assert!(freq.bits() > 0);

    let val0 = modulated_sine(phi0, att);

    let Some((cnt1, phi_t, val1)) = scan_transition(phi0, freq, att, val0) else {
        return Schedule::Inactive;
    };
    if (val1.bits() as i32 - val0.bits() as i32).abs() > 1 {
        return Schedule::Inactive;
    }
    let Some((cnt2, _, _)) = scan_transition(phi_t, freq, att, val1) else {
        return Schedule::Inactive;
    };

    // Symmetric working window: the whole left plateau remainder plus half
    // of the right plateau, so successive intervals run middle to middle.
    let sampl = cnt1 + cnt2 / 2;
    let steps = isqrt(sampl.min(SQUARE_LUT_SIZE as u16 * SQUARE_LUT_SIZE as u16 - 1));
    if steps < 2 {
        return Schedule::Inactive;
    }

    let msize = sampl / steps;
    let asize = sampl % steps;
    let aidx = steps * msize;
    let ridx = sampl;
    let phi1 = phi0.wrapping_add(Uq016::from_bits(sampl.wrapping_mul(freq.bits())));

    Schedule::Scheduled {
        phi0,
        val0,
        phi1,
        val1,
        sampl,
        steps,
        msize,
        asize,
        sidx: 0,
        aidx,
        ridx,
    }
}
