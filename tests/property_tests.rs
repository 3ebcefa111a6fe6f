//! Property-based tests for horizon handling and generator determinism.

use proptest::prelude::*;
use varmax_forecast::core::{ForecastHorizon, Period, SeriesFrame};
use varmax_forecast::models::{MultiForecaster, Varmax};
use varmax_forecast::synth::random_integer_frame;

fn fit_panel(seed: u64, n: usize) -> (SeriesFrame, Varmax) {
    let start = Period::new(2020, 1).unwrap();
    let y = random_integer_frame(seed, start, n, &["A", "B"]).unwrap();
    let mut model = Varmax::default();
    model.fit(&y, None).unwrap();
    (y, model)
}

/// Strategy for a valid set of unique positive offsets.
fn offsets_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::btree_set(1usize..20, 1..8).prop_map(|s| s.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn forecast_length_matches_horizon(
        seed in 0u64..1000,
        offsets in offsets_strategy()
    ) {
        let (_, model) = fit_panel(seed, 24);
        let fh = ForecastHorizon::new(offsets.clone()).unwrap();
        let pred = model.predict(&fh, None).unwrap();
        prop_assert_eq!(pred.len(), offsets.len());
    }

    #[test]
    fn horizon_order_is_irrelevant(
        seed in 0u64..1000,
        offsets in offsets_strategy()
    ) {
        let (_, model) = fit_panel(seed, 24);

        let mut reversed = offsets.clone();
        reversed.reverse();
        let a = model.predict(&ForecastHorizon::new(offsets).unwrap(), None).unwrap();
        let b = model.predict(&ForecastHorizon::new(reversed).unwrap(), None).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prediction_periods_follow_training_window(
        seed in 0u64..1000,
        offsets in offsets_strategy()
    ) {
        let (y, model) = fit_panel(seed, 24);
        let fh = ForecastHorizon::new(offsets).unwrap();
        let pred = model.predict(&fh, None).unwrap();

        let last = y.last_period().unwrap();
        for (period, &h) in pred.periods().iter().zip(fh.offsets()) {
            prop_assert_eq!(period.months_since(&last), h as i64);
        }
    }

    #[test]
    fn generator_determinism(seed in 0u64..10_000) {
        let start = Period::new(2020, 1).unwrap();
        let a = random_integer_frame(seed, start, 23, &["A", "B", "C"]).unwrap();
        let b = random_integer_frame(seed, start, 23, &["A", "B", "C"]).unwrap();
        prop_assert_eq!(a, b);
    }
}
