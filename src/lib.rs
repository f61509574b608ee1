#![forbid(unsafe_code)]
//! Estimates the CO₂ emissions of a flight using a pre-trained regression model.
//!
//! A request flows as follows:
//! [`FlightInput`] -> [`normalize`] (fuel mix) -> [`RawInput`] -> [`build`] ([`FeatureVector`])
//! -> [`Predictor::predict`] -> [`Estimate`] or [`PredictionFailure`].
pub mod csv;
mod features;
mod fuel_mix;
pub(crate) mod input;
mod model;
mod prediction;
mod schema;

pub use features::*;
pub use fuel_mix::*;
pub use input::{FlightInput, RawInput};
pub use model::*;
pub use prediction::*;
pub use schema::*;
