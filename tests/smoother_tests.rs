//! Quantization smoother tests: bounded deviation, value-set soundness.
//!
//! Reference scenario throughout: freq = 4, phi = 0, att = 65528, i.e. an
//! amplitude of 1/8192 quantizing the output to nine levels [-4; +4] over
//! a 16384-sample period. The low amplitude-to-phase resolution ratio
//! produces long plateaus, exactly the regime the smoother targets.

use std::collections::BTreeSet;

use fixsine::{modulated_sine, Oscillator, Schedule, Uq016};
use proptest::prelude::*;

const PERIOD: usize = 16384;

fn uq(code: u16) -> Uq016 {
    Uq016::from_bits(code)
}

fn reference_oscillator(smoothing: bool) -> Oscillator {
    let mut gen = Oscillator::new();
    gen.set_smoothing(smoothing);
    gen.set_attenuation(uq(65528));
    gen.set_frequency(uq(4));
    gen
}

fn collect(gen: &mut Oscillator, n: usize) -> Vec<i16> {
    (0..n)
        .map(|_| {
            let v = gen.output().bits();
            gen.step();
            v
        })
        .collect()
}

#[test]
fn test_smoothed_deviates_at_most_one_unit() {
    let mut raw = reference_oscillator(false);
    let mut smoothed = reference_oscillator(true);

    for i in 0..PERIOD {
        let r = raw.output().bits() as i32;
        let s = smoothed.output().bits() as i32;
        assert!((r - s).abs() <= 1, "sample {}: raw {}, smoothed {}", i, r, s);
        raw.step();
        smoothed.step();
    }
}

#[test]
fn test_smoothed_emits_only_quantized_levels() {
    let mut raw = reference_oscillator(false);
    let mut smoothed = reference_oscillator(true);

    let raw_levels: BTreeSet<i16> = collect(&mut raw, PERIOD).into_iter().collect();
    let smoothed_levels: BTreeSet<i16> = collect(&mut smoothed, PERIOD).into_iter().collect();

    assert!(smoothed_levels.is_subset(&raw_levels));
    assert_eq!(raw_levels.len(), 9); // [-4; +4]
}

#[test]
fn test_smoothing_engages_for_reference_scenario() {
    let mut raw = reference_oscillator(false);
    let mut smoothed = reference_oscillator(true);

    assert!(matches!(smoothed.schedule(), Schedule::Scheduled { .. }));

    let a = collect(&mut raw, PERIOD);
    let b = collect(&mut smoothed, PERIOD);
    assert_ne!(a, b);
}

#[test]
fn test_smoothing_dithers_transitions() {
    // Spreading each one-unit jump over a tiled pattern multiplies the
    // number of sample-to-sample changes.
    let mut raw = reference_oscillator(false);
    let mut smoothed = reference_oscillator(true);

    let changes = |series: &[i16]| series.windows(2).filter(|w| w[0] != w[1]).count();
    let a = collect(&mut raw, PERIOD);
    let b = collect(&mut smoothed, PERIOD);
    assert!(changes(&b) > changes(&a));
}

#[test]
fn test_scheduled_interval_emits_exactly_boundary_values() {
    let mut gen = reference_oscillator(true);

    let Schedule::Scheduled { val0, val1, sampl, .. } = gen.schedule() else {
        panic!("expected a schedule for the reference scenario");
    };

    let values: BTreeSet<i16> = collect(&mut gen, sampl as usize)
        .into_iter()
        .collect();
    let expect: BTreeSet<i16> = [val0.bits(), val1.bits()].into_iter().collect();
    assert_eq!(values, expect);
}

#[test]
fn test_intervals_chain_across_the_period() {
    // After each retirement the next interval starts where the previous
    // one ended; the schedule stays active through the plateau regime of
    // the first quadrant.
    let mut gen = reference_oscillator(true);

    let Schedule::Scheduled { sampl, phi1, .. } = gen.schedule() else {
        panic!("expected a schedule");
    };
    for _ in 0..sampl {
        gen.step();
    }
    // The retired interval's right boundary is the new left boundary.
    match gen.schedule() {
        Schedule::Scheduled { phi0, .. } => assert_eq!(phi0, phi1),
        Schedule::Inactive => panic!("expected the next interval to be scheduled"),
    }
}

#[test]
fn test_disabling_smoothing_clears_schedule() {
    let mut gen = reference_oscillator(true);
    assert!(matches!(gen.schedule(), Schedule::Scheduled { .. }));

    gen.set_smoothing(false);
    assert_eq!(gen.schedule(), Schedule::Inactive);
    assert_eq!(
        gen.output(),
        modulated_sine(gen.phase(), gen.attenuation())
    );
}

proptest! {
    #[test]
    fn prop_bounded_deviation(
        freq in 1u16..=0x4000,
        phi in any::<u16>(),
        att in any::<u16>(),
    ) {
        let mut raw = Oscillator::new();
        raw.set_smoothing(false);
        raw.set_attenuation(uq(att));
        raw.set_phase(uq(phi));
        raw.set_frequency(uq(freq));

        let mut smoothed = Oscillator::new();
        smoothed.set_attenuation(uq(att));
        smoothed.set_phase(uq(phi));
        smoothed.set_frequency(uq(freq));

        for _ in 0..2048 {
            let r = raw.output().bits() as i32;
            let s = smoothed.output().bits() as i32;
            prop_assert!((r - s).abs() <= 1);
            raw.step();
            smoothed.step();
        }
    }
}
