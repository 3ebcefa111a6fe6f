//! Temporal train/test splitting.

use crate::core::SeriesFrame;
use crate::error::{ForecastError, Result};

/// Default fraction of observations assigned to the test suffix.
pub const DEFAULT_TEST_FRACTION: f64 = 0.25;

/// Partition a frame into a chronologically earlier training prefix and a
/// later test suffix. The test size is `ceil(n * fraction)`; both parts must
/// end up non-empty.
pub fn temporal_train_test_split(
    frame: &SeriesFrame,
    test_fraction: Option<f64>,
) -> Result<(SeriesFrame, SeriesFrame)> {
    let fraction = test_fraction.unwrap_or(DEFAULT_TEST_FRACTION);
    if !(0.0..1.0).contains(&fraction) || fraction == 0.0 {
        return Err(ForecastError::InvalidParameter(format!(
            "test fraction must be in (0, 1), got {}",
            fraction
        )));
    }

    let n = frame.len();
    let test_size = ((n as f64) * fraction).ceil() as usize;
    if test_size == 0 || test_size >= n {
        return Err(ForecastError::InsufficientData { needed: 2, got: n });
    }

    let split = n - test_size;
    Ok((frame.slice(0, split)?, frame.slice(split, n)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Period;

    fn frame(n: usize) -> SeriesFrame {
        SeriesFrame::from_start(
            Period::new(2020, 1).unwrap(),
            vec!["A".to_string()],
            vec![(0..n).map(|i| i as f64).collect()],
        )
        .unwrap()
    }

    #[test]
    fn default_split_of_23_is_17_train_6_test() {
        let (train, test) = temporal_train_test_split(&frame(23), None).unwrap();
        assert_eq!(train.len(), 17);
        assert_eq!(test.len(), 6);
    }

    #[test]
    fn split_is_chronological_and_gap_free() {
        let (train, test) = temporal_train_test_split(&frame(23), None).unwrap();
        assert_eq!(
            test.first_period().unwrap(),
            train.last_period().unwrap().next()
        );
        assert_eq!(train.column("A").unwrap()[16], 16.0);
        assert_eq!(test.column("A").unwrap()[0], 17.0);
    }

    #[test]
    fn custom_fraction() {
        let (train, test) = temporal_train_test_split(&frame(10), Some(0.5)).unwrap();
        assert_eq!(train.len(), 5);
        assert_eq!(test.len(), 5);
    }

    #[test]
    fn split_validates_fraction_and_size() {
        assert!(temporal_train_test_split(&frame(10), Some(0.0)).is_err());
        assert!(temporal_train_test_split(&frame(10), Some(1.0)).is_err());
        assert!(temporal_train_test_split(&frame(10), Some(-0.1)).is_err());

        // One observation cannot be partitioned.
        assert!(matches!(
            temporal_train_test_split(&frame(1), None),
            Err(ForecastError::InsufficientData { .. })
        ));
    }
}
