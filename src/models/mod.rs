//! Forecasting models.

mod traits;
mod varmax;

pub use traits::{BoxedMultiForecaster, MultiForecaster};
pub use varmax::{Varmax, VarmaxSpec};
