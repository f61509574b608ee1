use std::error::Error;

use serde::Deserialize;

use crate::FeatureVector;

/// A pre-trained model that estimates the CO₂ emissions of a flight from its [`FeatureVector`].
pub trait Predictor {
    fn predict(&self, features: &FeatureVector) -> Result<f64, Box<dyn Error>>;
}

impl<P: Predictor + ?Sized> Predictor for &P {
    fn predict(&self, features: &FeatureVector) -> Result<f64, Box<dyn Error>> {
        (**self).predict(features)
    }
}

/// A linear regression: `intercept + Σ coefficients[i] * features[i]`.
/// The coefficients are positionally aligned to the schema the model was trained on.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl Predictor for LinearModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, Box<dyn Error>> {
        if features.len() != self.coefficients.len() {
            return Err(format!(
                "X has {} features, but the model is expecting {} features as input",
                features.len(),
                self.coefficients.len()
            )
            .into());
        }
        let prediction = features
            .as_slice()
            .iter()
            .zip(self.coefficients.iter())
            .fold(self.intercept, |acc, (x, w)| acc + x * w);
        if !prediction.is_finite() {
            return Err(format!("prediction is not finite ({prediction})").into());
        }
        Ok(prediction)
    }
}

/// Loads a [`LinearModel`] from a JSON file (e.g. `src/model.json`).
/// # Error
/// Errors if the file cannot be read or parsed
pub fn load_model(path: &str) -> Result<LinearModel, Box<dyn Error>> {
    let data = std::fs::read(path)?;
    let model: LinearModel = serde_json::from_slice(&data)?;
    log::info!("{path} - linear model with {} coefficients", model.coefficients.len());
    Ok(model)
}
