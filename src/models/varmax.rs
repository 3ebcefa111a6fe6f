//! VARMAX model: vector autoregression with exogenous regressors.
//!
//! The autoregressive and exogenous parts are estimated by exact
//! per-equation least squares on the lagged design matrix. Moving-average
//! terms would require iterative likelihood maximization and are not
//! supported; a specification with q > 0 is rejected up front.

use crate::core::{ForecastHorizon, Period, SeriesFrame};
use crate::error::{ForecastError, Result};
use crate::models::MultiForecaster;

/// VARMAX order specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarmaxSpec {
    /// AR order (p), at least 1.
    pub p: usize,
    /// MA order (q), must be 0.
    pub q: usize,
}

impl VarmaxSpec {
    /// Create a new specification.
    pub fn new(p: usize, q: usize) -> Result<Self> {
        if p == 0 {
            return Err(ForecastError::InvalidParameter(
                "AR order p must be at least 1".to_string(),
            ));
        }
        if q != 0 {
            return Err(ForecastError::InvalidParameter(
                "moving-average terms (q > 0) are not supported".to_string(),
            ));
        }
        Ok(Self { p, q })
    }

    /// Parameters per equation for `k` targets and `m` regressors.
    fn params_per_equation(&self, k: usize, m: usize) -> usize {
        1 + k * self.p + m
    }
}

impl Default for VarmaxSpec {
    fn default() -> Self {
        Self { p: 1, q: 0 }
    }
}

#[derive(Debug, Clone)]
struct FittedState {
    labels: Vec<String>,
    exog_labels: Vec<String>,
    intercepts: Vec<f64>,
    /// ar[equation][lag][variable]
    ar: Vec<Vec<Vec<f64>>>,
    /// exog[equation][regressor]
    exog: Vec<Vec<f64>>,
    /// Last p observations, oldest first: tail[i][variable].
    tail: Vec<Vec<f64>>,
    last_period: Period,
    fitted: SeriesFrame,
    residuals: SeriesFrame,
}

/// VARMAX forecasting model (the model under test in the verification
/// pipeline). Defaults to order (1, 0) with an intercept per equation.
#[derive(Debug, Clone, Default)]
pub struct Varmax {
    spec: VarmaxSpec,
    state: Option<FittedState>,
}

impl Varmax {
    /// Create a model with the given specification.
    pub fn new(spec: VarmaxSpec) -> Self {
        Self { spec, state: None }
    }

    /// Create a VAR(p) model without moving-average terms.
    pub fn with_order(p: usize) -> Result<Self> {
        Ok(Self::new(VarmaxSpec::new(p, 0)?))
    }

    /// Get the model specification.
    pub fn spec(&self) -> VarmaxSpec {
        self.spec
    }

    /// Per-equation intercepts, once fitted.
    pub fn intercepts(&self) -> Option<&[f64]> {
        self.state.as_ref().map(|s| s.intercepts.as_slice())
    }

    /// Coefficient of `variable` at `lag` (1-based) in `equation`.
    pub fn ar_coefficient(&self, equation: usize, lag: usize, variable: usize) -> Option<f64> {
        let state = self.state.as_ref()?;
        state
            .ar
            .get(equation)?
            .get(lag.checked_sub(1)?)?
            .get(variable)
            .copied()
    }

    /// Exogenous coefficients per equation, once fitted.
    pub fn exog_coefficients(&self) -> Option<&[Vec<f64>]> {
        self.state.as_ref().map(|s| s.exog.as_slice())
    }

    /// In-sample one-step-ahead predictions (periods p..n of the training
    /// window).
    pub fn fitted_values(&self) -> Option<&SeriesFrame> {
        self.state.as_ref().map(|s| &s.fitted)
    }

    /// In-sample residuals (actual - fitted).
    pub fn residuals(&self) -> Option<&SeriesFrame> {
        self.state.as_ref().map(|s| &s.residuals)
    }

    fn validate_fit_input(&self, y: &SeriesFrame, x: Option<&SeriesFrame>) -> Result<()> {
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

        let k = y.width();
        let m = x.map(|x| x.width()).unwrap_or(0);
        let needed = self.spec.p + self.spec.params_per_equation(k, m);
        if y.len() < needed {
            return Err(ForecastError::InsufficientData {
                needed,
                got: y.len(),
            });
        }
        Ok(())
    }

    /// The exogenous frame for prediction must cover every month the
    /// recursion passes through: offsets 1..=max(fh) after training.
    fn prediction_exog(
        state: &FittedState,
        fh: &ForecastHorizon,
        x: Option<&SeriesFrame>,
    ) -> Result<Option<Vec<Vec<f64>>>> {
        if state.exog_labels.is_empty() {
            if x.is_some() {
                return Err(ForecastError::InvalidParameter(
                    "model was fitted without exogenous regressors".to_string(),
                ));
            }
            return Ok(None);
        }

        let x = x.ok_or_else(|| {
            ForecastError::MissingRegressor(
                "model was fitted with exogenous regressors".to_string(),
            )
        })?;

        let required = Period::range(state.last_period.next(), fh.max());
        if x.periods() != required.as_slice() {
            let missing = required
                .iter()
                .find(|p| x.position(p).is_none())
                .map(|p| format!("no values for {}", p))
                .unwrap_or_else(|| "index does not cover the prediction window".to_string());
            return Err(ForecastError::MissingRegressor(missing));
        }

        // Row-major exogenous matrix in training column order.
        let mut columns = Vec::with_capacity(state.exog_labels.len());
        for label in &state.exog_labels {
            let values = x
                .column(label)
                .map_err(|_| ForecastError::MissingRegressor(format!("missing column '{}'", label)))?;
            columns.push(values);
        }
        let rows = (0..fh.max())
            .map(|t| columns.iter().map(|col| col[t]).collect())
            .collect();
        Ok(Some(rows))
    }
}

impl MultiForecaster for Varmax {
    fn fit(&mut self, y: &SeriesFrame, x: Option<&SeriesFrame>) -> Result<()> {
        self.validate_fit_input(y, x)?;

        let p = self.spec.p;
        let n = y.len();
        let k = y.width();
        let m = x.map(|x| x.width()).unwrap_or(0);
        let d = self.spec.params_per_equation(k, m);

        // Design matrix rows for t = p..n: [1, y_{t-1}, ..., y_{t-p}, x_t].
        let mut design: Vec<Vec<f64>> = Vec::with_capacity(n - p);
        for t in p..n {
            let mut row = Vec::with_capacity(d);
            row.push(1.0);
            for lag in 1..=p {
                row.extend(y.row(t - lag)?);
            }
            if let Some(x) = x {
                row.extend(x.row(t)?);
            }
            design.push(row);
        }

        // Normal equations, shared across equations.
        let mut xtx = vec![vec![0.0; d]; d];
        for row in &design {
            for i in 0..d {
                for j in 0..d {
                    xtx[i][j] += row[i] * row[j];
                }
            }
        }

        let mut intercepts = vec![0.0; k];
        let mut ar = vec![vec![vec![0.0; k]; p]; k];
        let mut exog = vec![vec![0.0; m]; k];
        let mut fitted_cols = vec![Vec::with_capacity(n - p); k];
        let mut residual_cols = vec![Vec::with_capacity(n - p); k];

        for eq in 0..k {
            let target = y.values(eq)?;
            let mut xty = vec![0.0; d];
            for (row, &obs) in design.iter().zip(&target[p..]) {
                for i in 0..d {
                    xty[i] += row[i] * obs;
                }
            }

            let beta = solve_symmetric(&xtx, &xty).ok_or_else(|| {
                ForecastError::ComputationError(
                    "least squares failed: normal equations not positive definite".to_string(),
                )
            })?;

            intercepts[eq] = beta[0];
            for lag in 0..p {
                for var in 0..k {
                    ar[eq][lag][var] = beta[1 + lag * k + var];
                }
            }
            for r in 0..m {
                exog[eq][r] = beta[1 + p * k + r];
            }

            for (row, &obs) in design.iter().zip(&target[p..]) {
                let pred: f64 = row.iter().zip(&beta).map(|(a, b)| a * b).sum();
                fitted_cols[eq].push(pred);
                residual_cols[eq].push(obs - pred);
            }
        }

        let fitted_periods = y.periods()[p..].to_vec();
        let fitted = SeriesFrame::new(fitted_periods.clone(), y.labels().to_vec(), fitted_cols)?;
        let residuals = SeriesFrame::new(fitted_periods, y.labels().to_vec(), residual_cols)?;

        let tail = (n - p..n).map(|t| y.row(t)).collect::<Result<Vec<_>>>()?;

        self.state = Some(FittedState {
            labels: y.labels().to_vec(),
            exog_labels: x.map(|x| x.labels().to_vec()).unwrap_or_default(),
            intercepts,
            ar,
            exog,
            tail,
            last_period: y.last_period()?,
            fitted,
            residuals,
        });
        Ok(())
    }

    fn predict(&self, fh: &ForecastHorizon, x: Option<&SeriesFrame>) -> Result<SeriesFrame> {
        let state = self.state.as_ref().ok_or(ForecastError::FitRequired)?;
        let exog_rows = Self::prediction_exog(state, fh, x)?;

        let p = self.spec.p;
        let k = state.labels.len();

        // Iterated multi-step recursion through every offset up to max(fh);
        // forecasts feed back in as lagged values.
        let mut history = state.tail.clone();
        let mut path: Vec<Vec<f64>> = Vec::with_capacity(fh.max());
        for h in 1..=fh.max() {
            let mut row = vec![0.0; k];
            for eq in 0..k {
                let mut value = state.intercepts[eq];
                for lag in 1..=p {
                    let prev = &history[history.len() - lag];
                    for var in 0..k {
                        value += state.ar[eq][lag - 1][var] * prev[var];
                    }
                }
                if let Some(rows) = &exog_rows {
                    for (coef, x_val) in state.exog[eq].iter().zip(&rows[h - 1]) {
                        value += coef * x_val;
                    }
                }
                row[eq] = value;
            }
            history.push(row.clone());
            path.push(row);
        }

        let values: Vec<Vec<f64>> = (0..k)
            .map(|var| fh.offsets().iter().map(|&h| path[h - 1][var]).collect())
            .collect();
        SeriesFrame::new(
            fh.to_absolute(state.last_period),
            state.labels.clone(),
            values,
        )
    }

    fn name(&self) -> &str {
        "VARMAX"
    }

    fn is_fitted(&self) -> bool {
        self.state.is_some()
    }
}

/// Solve a symmetric positive definite system via Cholesky decomposition.
fn solve_symmetric(a: &[Vec<f64>], b: &[f64]) -> Option<Vec<f64>> {
    let n = b.len();
    if n == 0 || a.len() != n {
        return None;
    }

    // A = L L'
    let mut l = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= l[i][k] * l[j][k];
            }
            if i == j {
                if sum <= 0.0 {
                    return None;
                }
                l[i][j] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    // L y = b
    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[i][j] * y[j];
        }
        y[i] = sum / l[i][i];
    }

    // L' x = y
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = y[i];
        for j in (i + 1)..n {
            sum -= l[j][i] * x[j];
        }
        x[i] = sum / l[i][i];
    }

    Some(x)
}
