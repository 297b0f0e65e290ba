//! Trigonometry on fixed-point data: phase-to-amplitude evaluation.
//!
//! The full-turn phase is a UQ0.16 value: [0.0; 1.0) maps to [0; 2*pi)
//! radians with resolution pi/2^15. Evaluation folds the phase into the
//! first quadrant with the standard symmetries, then interpolates the
//! quarter-period lookup table linearly between knots.
//!
//! Both functions are pure and deterministic; the smoother relies on that
//! when it re-evaluates them during its lookahead scan.

use crate::fixed::{Sq015, Uq016};
use crate::lut::{SINE_LUT, SINE_LUT_SIZE};

/// Width of the interpolation remainder below the LUT key, in bits.
///
/// The first quadrant spans 0x4000 distinct phase codes over 256 entries,
/// leaving 64 representable phases between adjacent knots.
const COEF_BITS: u32 = 6;

/// Bit mask for the interpolation remainder.
const COEF_MASK: u16 = (1 << COEF_BITS) - 1;

/// Phase code of pi/2 (0.25 of a turn).
const QUARTER: u16 = 0x4000;

/// Phase code of pi (0.5 of a turn).
const HALF: u16 = 0x8000;

/// Phase code of 3*pi/2 (0.75 of a turn).
const THREE_QUARTER: u16 = 0xC000;

/// Sine over the first quadrant: `sin(phi)` for phi in [0; pi/2).
///
/// `phi` is a UQ0.16 value restricted to [0.0; 0.25), i.e. container codes
/// [0x0000; 0x3FFF]; the result is the UQ0.16 magnitude in [0.0; 1.0).
///
/// The phase code splits into a table key (high 8 bits of the quadrant)
/// and a remainder used as the linear interpolation coefficient. A zero
/// remainder returns the table entry exactly; otherwise the two bracketing
/// entries are blended with exact fixed-point products rounded down. At the
/// top knot the right-hand bracket is the unrepresentable value 1.0, whose
/// product with the coefficient degenerates to the coefficient itself.
#[inline]
pub fn quarter_sine(phi: Uq016) -> Uq016 {
    debug_assert!(phi.bits() < QUARTER, "phase outside the first quadrant");

    let key0 = (phi.bits() >> COEF_BITS) as usize;
    let coef = Uq016::from_bits((phi.bits() & COEF_MASK) << (16 - COEF_BITS));

    if coef.bits() == 0 {
        return Uq016::from_bits(SINE_LUT[key0]);
    }

    let key1 = key0 + 1;
    let val1 = if key1 == SINE_LUT_SIZE {
        coef // lut[256] would be 1.0: 1.0 * coef == coef
    } else {
        Uq016::from_bits(SINE_LUT[key1]).mul(coef)
    };
    let val0 = Uq016::from_bits(SINE_LUT[key0]).mul(coef.complement());

    // The blend of an increasing pair never exceeds the right bracket,
    // so the sum stays within the UQ0.16 range.
    Uq016::from_bits(val0.bits() + val1.bits())
}

/// Modulated sine over the full turn: `sin(2*pi*phi) * (1 - att)` as SQ0.15.
///
/// `phi` covers the whole turn [0.0; 1.0); wraparound is the caller's
/// responsibility via modular phase arithmetic. `att` is the attenuation
/// factor in [0.0; 1.0); the amplitude scale is its complement `1 - att`.
///
/// The phases of the two sine extrema (0.25 and 0.75 of a turn) are handled
/// explicitly since +1.0 has no UQ0.16 code: they return the signed rails
/// +0x7FFF / -0x8000, scaled by `1 - att` when attenuation is present.
///
/// Elsewhere the magnitude from the first quadrant is attenuated and shrunk
/// to SQ0.15 with a round-up correction: when the discarded low bit was set
/// and the value is not already at the positive rail, one unit is added.
/// This cancels the systematic downward bias a truncating shrink would
/// otherwise introduce.
#[inline]
pub fn modulated_sine(phi: Uq016, att: Uq016) -> Sq015 {
    if phi.bits() == QUARTER {
        return if att.bits() == 0 {
            Sq015::from_bits(i16::MAX)
        } else {
            att.complement().to_signed()
        };
    }
    if phi.bits() == THREE_QUARTER {
        return if att.bits() == 0 {
            Sq015::from_bits(i16::MIN)
        } else {
            Sq015::from_bits(-att.complement().to_signed().bits())
        };
    }

    // Fold into the first quadrant, tracking the sign of the half-turn.
    let mut folded = phi.bits();
    let mut negative = false;
    if folded >= HALF {
        folded -= HALF;
        negative = true;
    }
    if folded > QUARTER {
        folded = HALF - folded;
    }

    let mut usin = quarter_sine(Uq016::from_bits(folded));

    if att.bits() > 0 {
        usin = usin.mul(att.complement());
    }

    let round_up = usin.bits() & 1 != 0;
    let mut ssin = usin.to_signed().bits();
    if round_up && ssin < i16::MAX {
        ssin += 1;
    }

    Sq015::from_bits(if negative { -ssin } else { ssin })
}
