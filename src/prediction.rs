use crate::{build, normalize, FeatureSet, FlightInput, FuelMix, Predictor, RawInput, ValidationWarning};

/// A failure of the model when estimating emissions. Nothing is retried.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionFailure {
    pub message: String,
}

impl std::error::Error for PredictionFailure {}

impl std::fmt::Display for PredictionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error making prediction: {}", self.message)
    }
}

/// The estimated CO₂ emissions of a flight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub emissions: f64,
    /// the fuel mix passed to the model
    pub mix: FuelMix,
    /// an advisory warning about the input, if any
    pub warning: Option<ValidationWarning>,
}

impl std::fmt::Display for Estimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Predicted CO₂ Emissions: {:.2} units", self.emissions)
    }
}

/// Estimates emissions of flights from a [`FeatureSet`] and a [`Predictor`], both
/// loaded once and shared read-only across requests.
pub struct Estimator<'a, P: Predictor> {
    features: &'a FeatureSet,
    predictor: P,
}

impl<'a, P: Predictor> Estimator<'a, P> {
    pub fn new(features: &'a FeatureSet, predictor: P) -> Self {
        Self {
            features,
            predictor,
        }
    }

    /// Estimates the emissions of `input`.
    /// A [`ValidationWarning`] does not stop the estimate; it is returned alongside it.
    /// # Error
    /// Errors when the predictor fails
    pub fn estimate(&self, input: &FlightInput) -> Result<Estimate, PredictionFailure> {
        let normalized = normalize(input.saf_percentage, input.jet_a1_percentage);
        let raw = RawInput::new(input, normalized.mix);
        let vector = build(&raw, self.features.schema());

        let emissions = self
            .predictor
            .predict(&vector)
            .map_err(|e| PredictionFailure {
                message: e.to_string(),
            })?;
        log::info!(
            "{} {} -> {}: {emissions:.2}",
            input.aircraft_type,
            input.departure_airport,
            input.arrival_airport
        );
        Ok(Estimate {
            emissions,
            mix: normalized.mix,
            warning: normalized.warning,
        })
    }
}
