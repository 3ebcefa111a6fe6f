//! # varmax-forecast
//!
//! Multivariate VARX forecasting with cross-implementation verification.
//!
//! The crate fits a vector autoregression with exogenous regressors
//! ([`models::Varmax`]) on period-indexed frames and verifies its forecasts
//! against an independently implemented reference model
//! ([`reference::ReferenceVarmax`], behind the `reference` feature) under a
//! relative tolerance. Supporting pieces: a deterministic synthetic data
//! generator, a temporal train/test splitter, and an element-wise comparator
//! that aligns prediction indexes before looking at values.

#![allow(clippy::needless_range_loop)]

pub mod core;
pub mod error;
pub mod models;
#[cfg(feature = "reference")]
pub mod reference;
pub mod split;
pub mod synth;
pub mod verify;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::core::{ForecastHorizon, Period, SeriesFrame};
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::{MultiForecaster, Varmax};
    pub use crate::split::temporal_train_test_split;
    pub use crate::verify::{compare_frames, Tolerance};
}
