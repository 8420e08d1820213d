mod fixtures;

use fixtures::load_fixture_bars;
use momenta::{Tsi, TsiConfig};

/// Default-config warm-up: price change from bar 2, line from bar 26
/// (trend 21 + fast 5 − 1 cascades over the change series), signal from
/// bar 80 (ladder ALMA(55) over the line series), crossings from bar 81.
#[test]
fn warm_up_lands_on_exact_bars() {
    let bars = load_fixture_bars();
    let mut tsi = Tsi::new(TsiConfig::default());

    for bar in &bars {
        let value = tsi.compute(bar);

        match bar.open_time {
            ..=25 => assert_eq!(tsi.line(), None, "line early at t={}", bar.open_time),
            26.. => assert!(tsi.line().is_some(), "line missing at t={}", bar.open_time),
        }
        match bar.open_time {
            ..=79 => assert_eq!(value, None, "value early at t={}", bar.open_time),
            80.. => assert!(value.is_some(), "value missing at t={}", bar.open_time),
        }
        match bar.open_time {
            ..=80 => assert_eq!(tsi.line_color(), None),
            81.. => assert!(tsi.line_color().is_some()),
        }
    }
}

#[test]
fn readiness_is_monotonic() {
    let bars = load_fixture_bars();
    let mut tsi = Tsi::new(TsiConfig::default());

    let mut converged = false;
    for bar in &bars {
        let ready = tsi.compute(bar).is_some();
        assert!(!converged || ready, "readiness regressed at t={}", bar.open_time);
        converged = ready;
    }
    assert!(converged, "never converged over the fixture stream");
}

#[test]
fn outputs_stay_finite_and_bounded() {
    let bars = load_fixture_bars();
    let mut tsi = Tsi::new(TsiConfig::default());

    for bar in &bars {
        if let Some(value) = tsi.compute(bar) {
            assert!(value.line().is_finite());
            assert!(value.signal().is_finite());
            assert!(value.histogram().is_finite());
            assert!(
                value.line().abs() <= 100.0 + 1e-9,
                "line out of bounds at t={}: {}",
                bar.open_time,
                value.line()
            );
            assert!(value.signal().abs() <= 100.0 + 1e-9);
        }
    }
}

/// Every derived flag must be recomputable from the recorded line/signal
/// history: the oscillator keeps no state the stream can't explain.
#[test]
fn flags_are_consistent_with_history() {
    let bars = load_fixture_bars();
    let mut tsi = Tsi::new(TsiConfig::default());

    let mut prev: Option<(f64, f64, f64)> = None;
    for bar in &bars {
        let Some(value) = tsi.compute(bar) else {
            continue;
        };
        let (line, signal, histogram) = (value.line(), value.signal(), value.histogram());

        assert_eq!(
            tsi.below_signal(),
            line <= signal,
            "below_signal inconsistent at t={}",
            bar.open_time
        );
        assert!((histogram - (line - signal)).abs() < 1e-12);

        if let Some((prev_line, prev_signal, prev_histogram)) = prev {
            assert_eq!(
                tsi.crossing_over(),
                line > signal && prev_line < prev_signal,
                "crossing_over inconsistent at t={}",
                bar.open_time
            );
            assert_eq!(
                tsi.crossing_under(),
                line < signal && prev_line > prev_signal,
                "crossing_under inconsistent at t={}",
                bar.open_time
            );
            assert_eq!(
                tsi.crossing_above_zero(),
                line > 0.0 && prev_line < 0.0,
                "crossing_above_zero inconsistent at t={}",
                bar.open_time
            );
            assert_eq!(
                tsi.crossing_below_zero(),
                line < 0.0 && prev_line > 0.0,
                "crossing_below_zero inconsistent at t={}",
                bar.open_time
            );

            let expected_hist_color = if tsi.below_signal() {
                if histogram >= prev_histogram {
                    momenta::HistColor::Maroon
                } else {
                    momenta::HistColor::Red
                }
            } else if histogram < prev_histogram {
                momenta::HistColor::Green
            } else {
                momenta::HistColor::Lime
            };
            assert_eq!(tsi.histogram_color(), Some(expected_hist_color));

            let expected_line_color = if tsi.below_signal() {
                momenta::LineColor::Red
            } else {
                momenta::LineColor::Green
            };
            assert_eq!(tsi.line_color(), Some(expected_line_color));
        }

        prev = Some((line, signal, histogram));
    }

    assert!(prev.is_some(), "signal line never appeared");
}

/// The oscillating fixture must actually exercise the crossing logic —
/// a stream that never crosses would vacuously pass the consistency test.
#[test]
fn fixture_produces_crossings() {
    let bars = load_fixture_bars();
    let mut tsi = Tsi::new(TsiConfig::default());

    let mut overs = 0;
    let mut unders = 0;
    for bar in &bars {
        tsi.compute(bar);
        overs += usize::from(tsi.crossing_over());
        unders += usize::from(tsi.crossing_under());
    }

    assert!(overs > 0, "no upward crossings in the fixture stream");
    assert!(unders > 0, "no downward crossings in the fixture stream");
}
