//! Fixed-point conversion tests: round trips over the full 16-bit domains.

use fixsine::{Sq015, Sq021, Uq016, Uq022};

#[test]
fn test_signed_width_round_trip_exhaustive() {
    for code in i16::MIN..=i16::MAX {
        let x = Sq015::from_bits(code);
        assert_eq!(x.widen().narrow(), x, "code = {}", code);
    }
}

#[test]
fn test_unsigned_width_round_trip_exhaustive() {
    for code in u16::MIN..=u16::MAX {
        let x = Uq016::from_bits(code);
        assert_eq!(x.widen().narrow(), x, "code = {}", code);
    }
}

#[test]
fn test_sign_round_trip_exact_for_non_negative() {
    // Removing the sign pads one zero bit on the right; re-inserting it
    // discards that same bit, so the round trip is lossless.
    for code in 0..=i16::MAX {
        let x = Sq015::from_bits(code);
        assert_eq!(x.to_unsigned().to_signed(), x, "code = {}", code);
    }
}

#[test]
fn test_unsigned_sign_round_trip_clears_low_bit() {
    // The opposite direction loses the least significant bit, re-inserted
    // as zero; all higher bits survive.
    for code in u16::MIN..=u16::MAX {
        let x = Uq016::from_bits(code);
        assert_eq!(x.to_signed().to_unsigned().bits(), code & !1, "code = {}", code);
    }
}

#[test]
fn test_wide_sign_round_trip_exact_for_non_negative() {
    // Spot-check the 22-bit pair at the format boundaries.
    for code in [0i32, 1, 0x0F_FFFF, 0x10_0000, 0x1F_FFFF] {
        let x = Sq021::from_bits(code);
        assert_eq!(x.to_unsigned().to_signed(), x, "code = {:#x}", code);
    }
}

#[test]
fn test_widen_preserves_value() {
    // Widening multiplies the code by 2^6, which is exactly the resolution
    // ratio between the formats: the represented rational is unchanged.
    assert_eq!(Sq015::from_bits(i16::MIN).widen(), Sq021::from_bits(-(1 << 21)));
    assert_eq!(Sq015::from_bits(i16::MAX).widen(), Sq021::from_bits(0x1F_FFC0));
    assert_eq!(Uq016::from_bits(0xFFFF).widen(), Uq022::from_bits(0x3F_FFC0));
}

#[test]
fn test_narrow_rounds_toward_negative_infinity() {
    // -1/2^21, the smallest negative SQ0.21, narrows to -1/2^15, not zero.
    assert_eq!(Sq021::from_bits(-1).narrow().bits(), -1);
    // +1/2^21 truncates to zero.
    assert_eq!(Sq021::from_bits(1).narrow().bits(), 0);
}
