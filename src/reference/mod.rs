//! Independent VARX reference implementation used as ground truth.
//!
//! Estimates the same statistical model as [`crate::models::Varmax`] through
//! a different numerical path: least squares via Householder QR on the
//! stacked design matrix instead of Cholesky on the normal equations.
//! Prediction uses absolute, 0-based, end-inclusive positions rather than a
//! relative horizon; the caller translates a horizon into a position range
//! and filters the contiguous raw output down to the requested offsets.
//!
//! Any output-shape translation a comparison needs belongs in here: the
//! public output is always a [`SeriesFrame`], whatever the internal layout.

use crate::core::{Period, SeriesFrame};
use crate::error::{ForecastError, Result};

#[derive(Debug, Clone)]
struct ReferenceState {
    labels: Vec<String>,
    exog_labels: Vec<String>,
    /// beta[equation] = [intercept, lag coefficients, exogenous coefficients]
    beta: Vec<Vec<f64>>,
    /// Observed training rows: observed[t][variable].
    observed: Vec<Vec<f64>>,
    /// Training exogenous rows: exog[t][regressor].
    exog_rows: Vec<Vec<f64>>,
    first_period: Period,
}

/// Reference VARX(p) model with per-equation QR least squares.
#[derive(Debug, Clone)]
pub struct ReferenceVarmax {
    p: usize,
    state: Option<ReferenceState>,
}

impl Default for ReferenceVarmax {
    fn default() -> Self {
        Self { p: 1, state: None }
    }
}

impl ReferenceVarmax {
    /// Create a reference model of AR order `p`.
    pub fn with_order(p: usize) -> Result<Self> {
        if p == 0 {
            return Err(ForecastError::InvalidParameter(
                "AR order p must be at least 1".to_string(),
            ));
        }
        Ok(Self { p, state: None })
    }

    /// AR order.
    pub fn order(&self) -> usize {
        self.p
    }

    /// Check if the model has been fitted.
    pub fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    /// Fit on the target frame `y` and optional exogenous frame `x` covering
    /// the same period range.
    pub fn fit(&mut self, y: &SeriesFrame, x: Option<&SeriesFrame>) -> Result<()> {
        if y.is_empty() || y.width() == 0 {
            return Err(ForecastError::EmptyData);
        }
        if !y.is_contiguous() {
            return Err(ForecastError::PeriodError(
                "target index must be consecutive months".to_string(),
            ));
        }
        if let Some(x) = x {
            if x.width() == 0 {
                return Err(ForecastError::EmptyData);
            }
            if x.periods() != y.periods() {
                return Err(ForecastError::IndexMismatch(
                    "exogenous index must equal the target index".to_string(),
                ));
            }
        }

        let p = self.p;
        let n = y.len();
        let k = y.width();
        let m = x.map(|x| x.width()).unwrap_or(0);
        let d = 1 + k * p + m;
        if n < p + d {
            return Err(ForecastError::InsufficientData {
                needed: p + d,
                got: n,
            });
        }

        let observed: Vec<Vec<f64>> = (0..n).map(|t| y.row(t)).collect::<Result<Vec<_>>>()?;
        let exog_rows: Vec<Vec<f64>> = match x {
            Some(x) => (0..n).map(|t| x.row(t)).collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        let mut design: Vec<Vec<f64>> = Vec::with_capacity(n - p);
        for t in p..n {
            design.push(design_row(&observed, &exog_rows, p, t));
        }

        let mut beta = Vec::with_capacity(k);
        for eq in 0..k {
            let target: Vec<f64> = (p..n).map(|t| observed[t][eq]).collect();
            let coef = lstsq_qr(&design, &target).ok_or_else(|| {
                ForecastError::ComputationError(
                    "least squares failed: design matrix is rank deficient".to_string(),
                )
            })?;
            beta.push(coef);
        }

        self.state = Some(ReferenceState {
            labels: y.labels().to_vec(),
            exog_labels: x.map(|x| x.labels().to_vec()).unwrap_or_default(),
            beta,
            observed,
            exog_rows,
            first_period: y.first_period()?,
        });
        Ok(())
    }

    /// Predict at absolute positions `start..=end` (0-based from the first
    /// training observation, end-inclusive).
    ///
    /// Positions inside the training window yield one-step-ahead in-sample
    /// predictions from observed lags; positions past it are recursive
    /// out-of-sample forecasts. The raw output spans the whole contiguous
    /// range and is meant to be filtered with [`SeriesFrame::at_periods`].
    pub fn predict_range(
        &self,
        start: usize,
        end: usize,
        x_future: Option<&SeriesFrame>,
    ) -> Result<SeriesFrame> {
        let state = self.state.as_ref().ok_or(ForecastError::FitRequired)?;
        let p = self.p;
        let n = state.observed.len();
        let k = state.labels.len();

        if start < p {
            return Err(ForecastError::InvalidParameter(format!(
                "start position must be at least the AR order ({})",
                p
            )));
        }
        if start > end {
            return Err(ForecastError::InvalidParameter(
                "start must be <= end".to_string(),
            ));
        }

        // Out-of-sample steps need exogenous rows for every position n..=end.
        let future_exog = self.future_exog(state, n, end, x_future)?;

        // Extend the observed rows with recursive forecasts up to `end`.
        let mut extended = state.observed.clone();
        let mut exog_extended = state.exog_rows.clone();
        if let Some(rows) = future_exog {
            exog_extended.extend(rows);
        }
        for t in n..=end {
            let row_design = design_row(&extended, &exog_extended, p, t);
            let row: Vec<f64> = (0..k)
                .map(|eq| dot(&row_design, &state.beta[eq]))
                .collect();
            extended.push(row);
        }

        let mut columns = vec![Vec::with_capacity(end - start + 1); k];
        for t in start..=end {
            let prediction: Vec<f64> = if t < n {
                // One-step-ahead from observed lags.
                let row_design = design_row(&state.observed, &state.exog_rows, p, t);
                (0..k).map(|eq| dot(&row_design, &state.beta[eq])).collect()
            } else {
                extended[t].clone()
            };
            for (eq, value) in prediction.into_iter().enumerate() {
                columns[eq].push(value);
            }
        }

        let periods: Vec<Period> = (start..=end)
            .map(|t| state.first_period.add_months(t as i64))
            .collect();
        SeriesFrame::new(periods, state.labels.clone(), columns)
    }

    fn future_exog(
        &self,
        state: &ReferenceState,
        n: usize,
        end: usize,
        x_future: Option<&SeriesFrame>,
    ) -> Result<Option<Vec<Vec<f64>>>> {
        if state.exog_labels.is_empty() {
            if x_future.is_some() {
                return Err(ForecastError::InvalidParameter(
                    "model was fitted without exogenous regressors".to_string(),
                ));
            }
            return Ok(None);
        }
        if end < n {
            // Entirely in-sample; training exog suffices.
            return Ok(Some(Vec::new()));
        }

        let x = x_future.ok_or_else(|| {
            ForecastError::MissingRegressor(
                "model was fitted with exogenous regressors".to_string(),
            )
        })?;
        let required = Period::range(state.first_period.add_months(n as i64), end - n + 1);
        if x.periods() != required.as_slice() {
            let missing = required
                .iter()
                .find(|p| x.position(p).is_none())
                .map(|p| format!("no values for {}", p))
                .unwrap_or_else(|| "index does not cover the prediction window".to_string());
            return Err(ForecastError::MissingRegressor(missing));
        }

        let mut columns = Vec::with_capacity(state.exog_labels.len());
        for label in &state.exog_labels {
            let values = x
                .column(label)
                .map_err(|_| ForecastError::MissingRegressor(format!("missing column '{}'", label)))?;
            columns.push(values);
        }
        let rows = (0..required.len())
            .map(|t| columns.iter().map(|col| col[t]).collect())
            .collect();
        Ok(Some(rows))
    }
}

/// Design row for position `t`: [1, rows[t-1], ..., rows[t-p], exog[t]].
fn design_row(rows: &[Vec<f64>], exog: &[Vec<f64>], p: usize, t: usize) -> Vec<f64> {
    let mut row = vec![1.0];
    for lag in 1..=p {
        row.extend_from_slice(&rows[t - lag]);
    }
    if !exog.is_empty() {
        row.extend_from_slice(&exog[t]);
    }
    row
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Least squares via Householder QR: minimizes ||X b - y||.
///
/// Returns `None` when the design matrix is rank deficient.
fn lstsq_qr(design: &[Vec<f64>], y: &[f64]) -> Option<Vec<f64>> {
    let m = design.len();
    if m == 0 || design[0].is_empty() || y.len() != m {
        return None;
    }
    let d = design[0].len();
    if m < d {
        return None;
    }

    // Working copies, reduced in place to [R | Q'y].
    let mut a: Vec<Vec<f64>> = design.to_vec();
    let mut rhs = y.to_vec();

    for col in 0..d {
        // Householder vector for column `col`, rows col..m.
        let norm: f64 = (col..m).map(|i| a[i][col] * a[i][col]).sum::<f64>().sqrt();
        if norm < 1e-12 {
            return None;
        }
        let alpha = if a[col][col] >= 0.0 { -norm } else { norm };
        let mut v: Vec<f64> = (col..m).map(|i| a[i][col]).collect();
        v[0] -= alpha;
        let v_norm_sq: f64 = v.iter().map(|x| x * x).sum();
        if v_norm_sq < 1e-24 {
            return None;
        }

        // Apply the reflector to the remaining columns and the RHS.
        for j in col..d {
            let proj: f64 = (col..m).map(|i| v[i - col] * a[i][j]).sum();
            let scale = 2.0 * proj / v_norm_sq;
            for i in col..m {
                a[i][j] -= scale * v[i - col];
            }
        }
        let proj: f64 = (col..m).map(|i| v[i - col] * rhs[i]).sum();
        let scale = 2.0 * proj / v_norm_sq;
        for i in col..m {
            rhs[i] -= scale * v[i - col];
        }
    }

    // Back substitution on the upper-triangular R.
    let mut beta = vec![0.0; d];
    for i in (0..d).rev() {
        let mut sum = rhs[i];
        for j in (i + 1)..d {
            sum -= a[i][j] * beta[j];
        }
        if a[i][i].abs() < 1e-12 {
            return None;
        }
        beta[i] = sum / a[i][i];
    }
    Some(beta)
}
