//! Core data structures: period index, series frame, forecasting horizon.

mod frame;
mod horizon;
mod period;

pub use frame::SeriesFrame;
pub use horizon::ForecastHorizon;
pub use period::Period;
