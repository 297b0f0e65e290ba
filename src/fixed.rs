//! Fixed-point data formats and bit-exact conversions.
//!
//! Notation: `SQm.n` is signed with 1 sign bit, `m` integer bits and `n`
//! fractional bits; `UQm.n` is unsigned with no sign bit. A format narrower
//! than its integer container is kept *canonical*: the unused high-order
//! container bits replicate the sign bit (signed) or are zero (unsigned).
//! Every constructor enforces canonical form, so a value of one of these
//! types is always a legal code for its format.
//!
//! Conversions are plain shifts with documented rounding:
//! - widen: left shift by the width delta (low bits padded with zero)
//! - narrow: arithmetic (signed) or logical (unsigned) right shift,
//!   discarding low bits — rounds toward −∞ / truncates
//! - sign removal: left shift by one, non-negative inputs only
//! - sign insertion: logical right shift by one, losing one bit of
//!   resolution

/// Width delta between the 16-bit and 22-bit formats.
const WIDTH_DELTA: u32 = 6;

/// Effective width of the 22-bit formats inside their 32-bit containers.
const WIDE_BITS: u32 = 22;

/// Bit mask for the effective bits of a 22-bit format.
const WIDE_MASK: u32 = (1 << WIDE_BITS) - 1;

/// Sign bit of the SQ0.21 format inside its container.
const SQ021_SIGN: u32 = 1 << (WIDE_BITS - 1);

/// SQ0.15 — signed fixed point, no integer bits, 15 fractional bits.
///
/// Range [-1.0; +1.0−1/2^15] with resolution 1/2^15. The container is
/// exactly the format width, so every `i16` bit pattern is canonical.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Sq015(i16);

/// UQ0.16 — unsigned fixed point, no integer bits, 16 fractional bits.
///
/// Range [0.0; 1.0−1/2^16] with resolution 1/2^16. Used for the oscillator
/// phase (scaled to [0; 2π)), frequency and attenuation. The container is
/// exactly the format width, so every `u16` bit pattern is canonical.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Uq016(u16);

/// SQ0.21 — signed fixed point, 21 fractional bits, in an `i32` container.
///
/// Range [-1.0; +1.0−1/2^21]. Only the low 22 container bits are effective;
/// the rest must replicate the sign bit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Sq021(i32);

/// UQ0.22 — unsigned fixed point, 22 fractional bits, in a `u32` container.
///
/// Range [0.0; 1.0−1/2^22]. Only the low 22 container bits are effective;
/// the rest must be zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Uq022(u32);

impl Sq015 {
    /// Wrap a container code. Every `i16` value is a canonical SQ0.15 code.
    #[inline]
    pub const fn from_bits(code: i16) -> Self {
        Sq015(code)
    }

    /// Raw container code.
    #[inline]
    pub const fn bits(self) -> i16 {
        self.0
    }

    /// Widen to SQ0.21. Exact: low bits are zero-padded.
    #[inline]
    pub const fn widen(self) -> Sq021 {
        Sq021((self.0 as i32) << WIDTH_DELTA)
    }

    /// Remove the sign, yielding UQ0.16 with one extra fractional bit.
    ///
    /// Only legal for non-negative values; negative magnitudes are not
    /// representable in the unsigned format.
    ///
    /// # Panics
    ///
    /// Panics if the value is negative.
    #[inline]
    pub fn to_unsigned(self) -> Uq016 {
        assert!(self.0 >= 0, "sign removal requires a non-negative value");
        Uq016((self.0 as u16) << 1)
    }
}

impl Uq016 {
    /// The zero code.
    pub const ZERO: Uq016 = Uq016(0);

    /// Wrap a container code. Every `u16` value is a canonical UQ0.16 code.
    #[inline]
    pub const fn from_bits(code: u16) -> Self {
        Uq016(code)
    }

    /// Raw container code.
    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Widen to UQ0.22. Exact: low bits are zero-padded.
    #[inline]
    pub const fn widen(self) -> Uq022 {
        Uq022((self.0 as u32) << WIDTH_DELTA)
    }

    /// Insert a sign bit, yielding non-negative SQ0.15.
    ///
    /// The least significant bit is discarded (logical shift right by one),
    /// losing one bit of resolution.
    #[inline]
    pub const fn to_signed(self) -> Sq015 {
        Sq015((self.0 >> 1) as i16)
    }

    /// Exact fixed-point product, rounded down.
    ///
    /// Computed as the full 32-bit product shifted right by the fractional
    /// width, so no intermediate precision is lost.
    #[inline]
    pub const fn mul(self, rhs: Uq016) -> Uq016 {
        Uq016(((self.0 as u32 * rhs.0 as u32) >> 16) as u16)
    }

    /// `1 − self`, modulo 1.0.
    ///
    /// The value 1.0 is not representable in UQ0.16; its code is 0x0000
    /// taken modulo 1.0, which makes the complement a plain two's-complement
    /// negation. Meaningful as a factor only for non-zero inputs.
    #[inline]
    pub const fn complement(self) -> Uq016 {
        Uq016(self.0.wrapping_neg())
    }

    /// Modular addition; phase arithmetic wraps at 1.0 (one full turn).
    #[inline]
    pub const fn wrapping_add(self, rhs: Uq016) -> Uq016 {
        Uq016(self.0.wrapping_add(rhs.0))
    }
}

impl Sq021 {
    /// Wrap a container code.
    ///
    /// # Panics
    ///
    /// Panics if the code is not canonical: the unused high container bits
    /// must replicate the sign bit.
    #[inline]
    pub fn from_bits(code: i32) -> Self {
        let u = code as u32;
        let numeric = if u & SQ021_SIGN != 0 { !u } else { u };
        assert!(numeric & !WIDE_MASK == 0, "non-canonical SQ0.21 code");
        Sq021(code)
    }

    /// Raw container code.
    #[inline]
    pub const fn bits(self) -> i32 {
        self.0
    }

    /// Narrow to SQ0.15 by an arithmetic right shift, discarding low bits.
    ///
    /// Rounds toward −∞. Callers needing round-to-nearest must pre-round.
    #[inline]
    pub const fn narrow(self) -> Sq015 {
        Sq015((self.0 >> WIDTH_DELTA) as i16)
    }

    /// Remove the sign, yielding UQ0.22.
    ///
    /// # Panics
    ///
    /// Panics if the value is negative.
    #[inline]
    pub fn to_unsigned(self) -> Uq022 {
        assert!(self.0 >= 0, "sign removal requires a non-negative value");
        Uq022((self.0 as u32) << 1)
    }
}

impl Uq022 {
    /// Wrap a container code.
    ///
    /// # Panics
    ///
    /// Panics if the code is not canonical: the unused high container bits
    /// must be zero.
    #[inline]
    pub fn from_bits(code: u32) -> Self {
        assert!(code & !WIDE_MASK == 0, "non-canonical UQ0.22 code");
        Uq022(code)
    }

    /// Raw container code.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Narrow to UQ0.16 by a logical right shift, discarding low bits.
    #[inline]
    pub const fn narrow(self) -> Uq016 {
        Uq016((self.0 >> WIDTH_DELTA) as u16)
    }

    /// Insert a sign bit, yielding non-negative SQ0.21.
    ///
    /// The least significant bit is discarded, losing one bit of resolution.
    #[inline]
    pub const fn to_signed(self) -> Sq021 {
        Sq021((self.0 >> 1) as i32)
    }
}
