//! Property tests for pipeline invariants.
//!
//! Uses proptest to verify:
//! 1. Shape: every column has one value per bar, the table one row per date after the first
//! 2. Majority vote: for every long/short split the overall call is the strict majority
//! 3. Monotonic columns: strictly increasing defined values derive Long at every step
//! 4. Determinism: the same input always produces the same table fingerprint

use chrono::NaiveDate;
use proptest::prelude::*;
use signalboard_core::domain::{Bar, IndicatorKind, OverallSignal, PriceSeries, Signal};
use signalboard_core::indicators::{IndicatorParams, IndicatorSet};
use signalboard_core::signals::{derive, SignalAggregator, DailySignals};
use signalboard_core::Pipeline;

// ── Strategies (proptest) ────────────────────────────────────────────

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()
}

/// Random-walk closes with OHLC bars wrapped around them.
fn arb_series(max_len: usize) -> impl Strategy<Value = PriceSeries> {
    prop::collection::vec((-0.04..0.04_f64, 0.0..0.02_f64, 0.0..0.02_f64), 1..max_len).prop_map(
        |steps| {
            let mut close = 100.0;
            let bars = steps
                .iter()
                .enumerate()
                .map(|(i, &(ret, up, down))| {
                    let open = close;
                    close *= 1.0 + ret;
                    Bar::new(
                        base_date() + chrono::Duration::days(i as i64),
                        open,
                        open.max(close) * (1.0 + up),
                        open.min(close) * (1.0 - down),
                        close,
                    )
                })
                .collect();
            PriceSeries::new(bars).unwrap()
        },
    )
}

fn arb_signals() -> impl Strategy<Value = Vec<Signal>> {
    prop::collection::vec(
        prop_oneof![Just(Signal::Long), Just(Signal::Short), Just(Signal::Neutral)],
        8,
    )
}

// ── 1. Shape ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn shape_matches_input(series in arb_series(80)) {
        let out = Pipeline::new(IndicatorParams::default()).unwrap().evaluate(&series).unwrap();
        prop_assert_eq!(out.indicators.column_count(), 8);
        for (_, values) in out.indicators.iter() {
            prop_assert_eq!(values.len(), series.len());
            prop_assert!(values.iter().flatten().all(|v| v.is_finite()));
        }
        prop_assert_eq!(out.table.len(), series.len() - 1);
    }
}

// ── 2. Majority Vote ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn overall_is_strict_majority(signals in arb_signals()) {
        let day = DailySignals {
            date: base_date(),
            signals: IndicatorKind::ALL.into_iter().zip(signals.iter().copied()).collect(),
        };
        let row = &SignalAggregator::aggregate(&[day])[0];

        let long = signals.iter().filter(|s| **s == Signal::Long).count();
        let short = signals.iter().filter(|s| **s == Signal::Short).count();
        let expected = match long.cmp(&short) {
            std::cmp::Ordering::Greater => (OverallSignal::Long, 1),
            std::cmp::Ordering::Less => (OverallSignal::Short, -1),
            std::cmp::Ordering::Equal => (OverallSignal::Neutral, 0),
        };
        prop_assert_eq!((row.overall, row.score), expected);
    }
}

#[test]
fn every_long_short_split_is_decided_by_majority() {
    for long in 0..=8 {
        for short in 0..=(8 - long) {
            let mut signals = vec![Signal::Long; long];
            signals.extend(std::iter::repeat(Signal::Short).take(short));
            signals.resize(8, Signal::Neutral);
            let day = DailySignals {
                date: base_date(),
                signals: IndicatorKind::ALL.into_iter().zip(signals).collect(),
            };
            let row = &SignalAggregator::aggregate(&[day])[0];
            let expected = if long > short {
                OverallSignal::Long
            } else if short > long {
                OverallSignal::Short
            } else {
                OverallSignal::Neutral
            };
            assert_eq!(row.overall, expected, "long={long} short={short}");
        }
    }
}

// ── 3. Monotonic Columns ─────────────────────────────────────────────

proptest! {
    /// Strictly increasing values after any warm-up derive Long everywhere both ends are defined.
    #[test]
    fn increasing_column_is_long(
        warmup in 0usize..10,
        increments in prop::collection::vec(0.001..10.0_f64, 1..40),
    ) {
        let n = warmup + increments.len();
        let dates: Vec<_> = (0..n).map(|i| base_date() + chrono::Duration::days(i as i64)).collect();
        let mut value = -5.0;
        let column: Vec<Option<f64>> = (0..n)
            .map(|i| {
                if i < warmup {
                    None
                } else {
                    value += increments[i - warmup];
                    Some(value)
                }
            })
            .collect();

        let mut set = IndicatorSet::new(dates);
        for kind in IndicatorKind::ALL {
            set.insert(kind, column.clone()).unwrap();
        }
        let rows = SignalAggregator::aggregate(&derive(&set));
        for (i, row) in rows.iter().enumerate() {
            let today = i + 1;
            if today > warmup {
                prop_assert!(row.signals.values().all(|s| *s == Signal::Long));
                prop_assert_eq!(row.overall, OverallSignal::Long);
            } else {
                prop_assert!(row.signals.values().all(|s| *s == Signal::Neutral));
                prop_assert_eq!(row.score, 0);
            }
        }
    }
}

// ── 4. Determinism ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn fingerprint_is_deterministic(series in arb_series(60)) {
        let pipeline = Pipeline::new(IndicatorParams::default()).unwrap();
        let a = pipeline.run(&series).unwrap();
        let b = pipeline.run(&series.clone()).unwrap();
        prop_assert_eq!(a.fingerprint(), b.fingerprint());
        prop_assert_eq!(a, b);
    }
}
