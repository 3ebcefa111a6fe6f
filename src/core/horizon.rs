//! Forecasting horizon: relative offsets into the future.

use crate::core::Period;
use crate::error::{ForecastError, Result};

/// A set of positive integer offsets relative to the end of the training
/// series. Offsets need not be contiguous. They are normalized to ascending
/// order on construction, so prediction output is always chronological and
/// the same horizon given in any order produces the same output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastHorizon {
    offsets: Vec<usize>,
}

impl ForecastHorizon {
    /// Create a horizon from relative offsets. Offsets must be positive and
    /// unique; they are stored sorted ascending.
    pub fn new(mut offsets: Vec<usize>) -> Result<Self> {
        if offsets.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "horizon must contain at least one offset".to_string(),
            ));
        }
        if offsets.contains(&0) {
            return Err(ForecastError::InvalidParameter(
                "horizon offsets must be positive".to_string(),
            ));
        }
        offsets.sort_unstable();
        if offsets.windows(2).any(|w| w[0] == w[1]) {
            return Err(ForecastError::InvalidParameter(
                "duplicate horizon offset".to_string(),
            ));
        }
        Ok(Self { offsets })
    }

    /// A contiguous horizon `1..=steps`.
    pub fn contiguous(steps: usize) -> Result<Self> {
        if steps == 0 {
            return Err(ForecastError::InvalidParameter(
                "horizon must contain at least one offset".to_string(),
            ));
        }
        Ok(Self {
            offsets: (1..=steps).collect(),
        })
    }

    /// The offsets in ascending order.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Number of requested offsets.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Horizons are never empty, but the accessor pair is kept for symmetry
    /// with the other containers.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Smallest offset.
    pub fn min(&self) -> usize {
        self.offsets[0]
    }

    /// Largest offset.
    pub fn max(&self) -> usize {
        self.offsets[self.offsets.len() - 1]
    }

    /// Translate the offsets to absolute periods relative to the last
    /// training period.
    pub fn to_absolute(&self, last_training: Period) -> Vec<Period> {
        self.offsets
            .iter()
            .map(|&h| last_training.add_months(h as i64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizon_normalizes_to_ascending_order() {
        let fh = ForecastHorizon::new(vec![3, 1, 9]).unwrap();
        assert_eq!(fh.offsets(), &[1, 3, 9]);
        assert_eq!(fh.len(), 3);
        assert_eq!(fh.min(), 1);
        assert_eq!(fh.max(), 9);

        let same = ForecastHorizon::new(vec![9, 3, 1]).unwrap();
        assert_eq!(fh, same);
    }

    #[test]
    fn horizon_rejects_invalid_offsets() {
        assert!(ForecastHorizon::new(vec![]).is_err());
        assert!(ForecastHorizon::new(vec![0]).is_err());
        assert!(ForecastHorizon::new(vec![1, 2, 2]).is_err());
        assert!(ForecastHorizon::contiguous(0).is_err());
    }

    #[test]
    fn horizon_contiguous_constructor() {
        let fh = ForecastHorizon::contiguous(4).unwrap();
        assert_eq!(fh.offsets(), &[1, 2, 3, 4]);
    }

    #[test]
    fn horizon_translates_to_absolute_periods() {
        let last = Period::new(2021, 5).unwrap();
        let fh = ForecastHorizon::new(vec![1, 3, 9]).unwrap();
        let absolute = fh.to_absolute(last);
        assert_eq!(absolute[0], Period::new(2021, 6).unwrap());
        assert_eq!(absolute[1], Period::new(2021, 8).unwrap());
        assert_eq!(absolute[2], Period::new(2022, 2).unwrap());
    }
}
