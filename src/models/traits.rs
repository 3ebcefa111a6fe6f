//! MultiForecaster trait defining the common interface for multivariate models.

use crate::core::{ForecastHorizon, SeriesFrame};
use crate::error::Result;

/// Common interface for multivariate forecasting models with optional
/// exogenous regressors.
///
/// This trait is object-safe and can be used with `Box<dyn MultiForecaster>`.
pub trait MultiForecaster {
    /// Fit the model to the target frame `y` and, if provided, the exogenous
    /// frame `x` covering the same period range.
    fn fit(&mut self, y: &SeriesFrame, x: Option<&SeriesFrame>) -> Result<()>;

    /// Generate predictions at the horizon's offsets. Models fitted with
    /// exogenous data require `x` to cover the prediction window.
    fn predict(&self, fh: &ForecastHorizon, x: Option<&SeriesFrame>) -> Result<SeriesFrame>;

    /// Get the model name.
    fn name(&self) -> &str;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool;
}

/// Type alias for boxed forecaster trait objects.
pub type BoxedMultiForecaster = Box<dyn MultiForecaster>;
