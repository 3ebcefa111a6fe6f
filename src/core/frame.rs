//! SeriesFrame: a period-indexed table of named float columns.
//!
//! The same structure is used for target series, exogenous regressors and
//! prediction output, so comparisons between independently computed
//! predictions can align on the index before looking at values.

use crate::core::Period;
use crate::error::{ForecastError, Result};

/// A multivariate time series: strictly increasing monthly periods with one
/// float column per variable. Values are stored column-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesFrame {
    periods: Vec<Period>,
    labels: Vec<String>,
    /// values[column][observation]
    values: Vec<Vec<f64>>,
}

impl SeriesFrame {
    /// Create a frame from periods, column labels and column-major values.
    pub fn new(periods: Vec<Period>, labels: Vec<String>, values: Vec<Vec<f64>>) -> Result<Self> {
        for w in periods.windows(2) {
            if w[1] <= w[0] {
                return Err(ForecastError::PeriodError(
                    "periods must be strictly increasing".to_string(),
                ));
            }
        }

        if labels.len() != values.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: values.len(),
                got: labels.len(),
            });
        }

        for (i, label) in labels.iter().enumerate() {
            if labels[..i].contains(label) {
                return Err(ForecastError::InvalidParameter(format!(
                    "duplicate column label '{}'",
                    label
                )));
            }
        }

        for column in &values {
            if column.len() != periods.len() {
                return Err(ForecastError::DimensionMismatch {
                    expected: periods.len(),
                    got: column.len(),
                });
            }
        }

        Ok(Self {
            periods,
            labels,
            values,
        })
    }

    /// Create a frame whose index is `n` consecutive months from `start`.
    pub fn from_start(start: Period, labels: Vec<String>, values: Vec<Vec<f64>>) -> Result<Self> {
        let n = values.first().map(|c| c.len()).unwrap_or(0);
        Self::new(Period::range(start, n), labels, values)
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Check if the frame is empty.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.values.len()
    }

    /// Period index.
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// First period of the index.
    pub fn first_period(&self) -> Result<Period> {
        self.periods.first().copied().ok_or(ForecastError::EmptyData)
    }

    /// Last period of the index.
    pub fn last_period(&self) -> Result<Period> {
        self.periods.last().copied().ok_or(ForecastError::EmptyData)
    }

    /// Column labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Column values by position.
    pub fn values(&self, column: usize) -> Result<&[f64]> {
        self.values
            .get(column)
            .map(|v| v.as_slice())
            .ok_or(ForecastError::IndexOutOfBounds {
                index: column,
                size: self.values.len(),
            })
    }

    /// All columns, column-major.
    pub fn columns(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Column values by label.
    pub fn column(&self, label: &str) -> Result<&[f64]> {
        let idx = self
            .labels
            .iter()
            .position(|l| l == label)
            .ok_or_else(|| ForecastError::UnknownColumn(label.to_string()))?;
        Ok(&self.values[idx])
    }

    /// One observation across all columns.
    pub fn row(&self, index: usize) -> Result<Vec<f64>> {
        if index >= self.len() {
            return Err(ForecastError::IndexOutOfBounds {
                index,
                size: self.len(),
            });
        }
        Ok(self.values.iter().map(|col| col[index]).collect())
    }

    /// A new frame with the named columns, in the given order.
    pub fn select(&self, labels: &[&str]) -> Result<SeriesFrame> {
        let mut values = Vec::with_capacity(labels.len());
        for label in labels {
            values.push(self.column(label)?.to_vec());
        }
        SeriesFrame::new(
            self.periods.clone(),
            labels.iter().map(|l| l.to_string()).collect(),
            values,
        )
    }

    /// A new frame restricted to observations `[start, end)`.
    pub fn slice(&self, start: usize, end: usize) -> Result<SeriesFrame> {
        if start > end {
            return Err(ForecastError::InvalidParameter(
                "start must be <= end".to_string(),
            ));
        }
        if end > self.len() {
            return Err(ForecastError::IndexOutOfBounds {
                index: end,
                size: self.len(),
            });
        }
        SeriesFrame::new(
            self.periods[start..end].to_vec(),
            self.labels.clone(),
            self.values.iter().map(|col| col[start..end].to_vec()).collect(),
        )
    }

    /// Position of `period` in the index, if present.
    pub fn position(&self, period: &Period) -> Option<usize> {
        // Index is sorted, so binary search applies.
        self.periods.binary_search(period).ok()
    }

    /// A new frame restricted to exactly the given periods, which must be
    /// strictly increasing. Any period absent from the index is a lookup
    /// error.
    pub fn at_periods(&self, periods: &[Period]) -> Result<SeriesFrame> {
        let mut rows = Vec::with_capacity(periods.len());
        for period in periods {
            let pos = self
                .position(period)
                .ok_or_else(|| ForecastError::PeriodNotFound(period.to_string()))?;
            rows.push(pos);
        }
        let values: Vec<Vec<f64>> = self
            .values
            .iter()
            .map(|col| rows.iter().map(|&i| col[i]).collect())
            .collect();
        SeriesFrame::new(periods.to_vec(), self.labels.clone(), values)
    }

    /// Whether the index is a gap-free run of consecutive months.
    pub fn is_contiguous(&self) -> bool {
        self.periods.windows(2).all(|w| w[1] == w[0].next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> SeriesFrame {
        SeriesFrame::from_start(
            Period::new(2020, 1).unwrap(),
            vec!["A".to_string(), "B".to_string()],
            vec![vec![1.0, 2.0, 3.0, 4.0], vec![10.0, 20.0, 30.0, 40.0]],
        )
        .unwrap()
    }

    #[test]
    fn frame_construction_and_accessors() {
        let f = frame();
        assert_eq!(f.len(), 4);
        assert_eq!(f.width(), 2);
        assert!(!f.is_empty());
        assert_eq!(f.labels(), &["A", "B"]);
        assert_eq!(f.column("A").unwrap(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(f.values(1).unwrap(), &[10.0, 20.0, 30.0, 40.0]);
        assert_eq!(f.row(2).unwrap(), vec![3.0, 30.0]);
        assert_eq!(f.first_period().unwrap().to_string(), "2020-01");
        assert_eq!(f.last_period().unwrap().to_string(), "2020-04");
        assert!(f.is_contiguous());
    }

    #[test]
    fn frame_validates_input() {
        let periods = Period::range(Period::new(2020, 1).unwrap(), 3);

        // Column length mismatch.
        let result = SeriesFrame::new(
            periods.clone(),
            vec!["A".to_string()],
            vec![vec![1.0, 2.0]],
        );
        assert!(matches!(
            result,
            Err(ForecastError::DimensionMismatch { expected: 3, got: 2 })
        ));

        // Label count mismatch.
        let result = SeriesFrame::new(
            periods.clone(),
            vec!["A".to_string(), "B".to_string()],
            vec![vec![1.0, 2.0, 3.0]],
        );
        assert!(result.is_err());

        // Duplicate labels.
        let result = SeriesFrame::new(
            periods,
            vec!["A".to_string(), "A".to_string()],
            vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]],
        );
        assert!(matches!(result, Err(ForecastError::InvalidParameter(_))));
    }

    #[test]
    fn frame_rejects_non_increasing_periods() {
        let p1 = Period::new(2020, 2).unwrap();
        let p2 = Period::new(2020, 1).unwrap();
        let result = SeriesFrame::new(
            vec![p1, p2],
            vec!["A".to_string()],
            vec![vec![1.0, 2.0]],
        );
        assert!(matches!(result, Err(ForecastError::PeriodError(_))));

        // Duplicate periods.
        let result = SeriesFrame::new(
            vec![p1, p1],
            vec!["A".to_string()],
            vec![vec![1.0, 2.0]],
        );
        assert!(matches!(result, Err(ForecastError::PeriodError(_))));
    }

    #[test]
    fn frame_select_reorders_columns() {
        let f = frame();
        let selected = f.select(&["B", "A"]).unwrap();
        assert_eq!(selected.labels(), &["B", "A"]);
        assert_eq!(selected.values(0).unwrap(), &[10.0, 20.0, 30.0, 40.0]);

        assert!(matches!(
            f.select(&["C"]),
            Err(ForecastError::UnknownColumn(_))
        ));
    }

    #[test]
    fn frame_slice_keeps_labels_and_periods() {
        let f = frame();
        let s = f.slice(1, 3).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.labels(), &["A", "B"]);
        assert_eq!(s.first_period().unwrap().to_string(), "2020-02");
        assert_eq!(s.column("A").unwrap(), &[2.0, 3.0]);

        assert!(f.slice(2, 1).is_err());
        assert!(f.slice(0, 5).is_err());
    }

    #[test]
    fn frame_at_periods_selects_sparse_rows() {
        let f = frame();
        let p = |m| Period::new(2020, m).unwrap();

        let picked = f.at_periods(&[p(2), p(4)]).unwrap();
        assert_eq!(picked.len(), 2);
        assert_eq!(picked.column("A").unwrap(), &[2.0, 4.0]);
        assert_eq!(picked.periods(), &[p(2), p(4)]);

        // Requested periods must themselves form a valid index.
        assert!(f.at_periods(&[p(4), p(2)]).is_err());
    }

    #[test]
    fn frame_at_periods_fails_loudly_on_missing_period() {
        let f = frame();
        let missing = Period::new(2021, 1).unwrap();
        assert!(matches!(
            f.at_periods(&[missing]),
            Err(ForecastError::PeriodNotFound(_))
        ));
    }

    #[test]
    fn frame_contiguity_detects_gaps() {
        let p = |m| Period::new(2020, m).unwrap();
        let f = SeriesFrame::new(
            vec![p(1), p(2), p(4)],
            vec!["A".to_string()],
            vec![vec![1.0, 2.0, 3.0]],
        )
        .unwrap();
        assert!(!f.is_contiguous());
    }

    #[test]
    fn empty_frame_period_access_errors() {
        let f = SeriesFrame::new(vec![], vec![], vec![]).unwrap();
        assert!(f.is_empty());
        assert!(matches!(f.first_period(), Err(ForecastError::EmptyData)));
        assert!(matches!(f.last_period(), Err(ForecastError::EmptyData)));
    }
}
