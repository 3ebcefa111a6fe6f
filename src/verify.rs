//! Numerical comparison of prediction outputs, plus the capability probe
//! for the reference implementation.
//!
//! Two independently computed prediction frames are compared by first
//! asserting exact index and label agreement, then checking element-wise
//! closeness under a relative/absolute tolerance. A single element outside
//! tolerance fails the whole comparison; there are no partial results.

use crate::core::SeriesFrame;
use crate::error::{ForecastError, Result};

/// Relative/absolute tolerance pair for element-wise closeness.
///
/// An element passes when `|a - b| <= atol + rtol * |b|`, with `b` taken
/// from the expected side. NaN never compares close.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub rtol: f64,
    pub atol: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            rtol: 1e-7,
            atol: 0.0,
        }
    }
}

impl Tolerance {
    /// Purely relative tolerance.
    pub fn relative(rtol: f64) -> Self {
        Self { rtol, atol: 0.0 }
    }

    fn close(&self, a: f64, b: f64) -> bool {
        if a.is_nan() || b.is_nan() {
            return false;
        }
        (a - b).abs() <= self.atol + self.rtol * b.abs()
    }
}

/// Check that two float slices are element-wise close.
pub fn allclose(a: &[f64], b: &[f64], tol: Tolerance) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| tol.close(x, y))
}

/// Compare two prediction frames: exact index and label agreement first,
/// then element-wise closeness of the full matrices.
pub fn compare_frames(actual: &SeriesFrame, expected: &SeriesFrame, tol: Tolerance) -> Result<()> {
    if actual.labels() != expected.labels() {
        return Err(ForecastError::IndexMismatch(format!(
            "labels {:?} vs {:?}",
            actual.labels(),
            expected.labels()
        )));
    }
    if actual.periods() != expected.periods() {
        let detail = actual
            .periods()
            .iter()
            .zip(expected.periods())
            .find(|(a, e)| a != e)
            .map(|(a, e)| format!("{} vs {}", a, e))
            .unwrap_or_else(|| {
                format!("{} vs {} periods", actual.len(), expected.len())
            });
        return Err(ForecastError::IndexMismatch(detail));
    }

    for (col, label) in expected.labels().iter().enumerate() {
        let a = actual.values(col)?;
        let e = expected.values(col)?;
        for (row, (&av, &ev)) in a.iter().zip(e).enumerate() {
            if !tol.close(av, ev) {
                return Err(ForecastError::ToleranceExceeded(format!(
                    "column '{}' at {}: actual={}, expected={}, diff={:e}",
                    label,
                    expected.periods()[row],
                    av,
                    ev,
                    (av - ev).abs()
                )));
            }
        }
    }
    Ok(())
}

/// Whether the independent reference implementation is compiled in.
///
/// Checked once before a comparison scenario runs; a missing reference is a
/// reported skip, never a failure.
pub fn reference_available() -> bool {
    cfg!(feature = "reference")
}
