use crate::{Feature, FeatureSchema, RawInput};

/// The input of a model: one value per slot of a [`FeatureSchema`], in the schema's order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// Returns the value of `feature` for `raw`:
/// * numeric features take the value of the field, or 0 when it is missing
/// * one-hot features are 1 when the selected category equals the feature's, else 0
/// * unknown features are 0
fn value(feature: &Feature, raw: &RawInput) -> f64 {
    match feature {
        Feature::Numeric(field) => raw.numeric(*field).unwrap_or(0.0),
        Feature::Categorical { dimension, value } => {
            if raw.category(*dimension) == Some(value.as_ref()) {
                1.0
            } else {
                0.0
            }
        }
        Feature::Unknown(_) => 0.0,
    }
}

/// Builds the [`FeatureVector`] of `raw` according to `schema`.
/// # Implementation
/// The result always has `schema.len()` values. A category that is not part of the
/// schema results in all one-hot features of its dimension being 0.
pub fn build(raw: &RawInput, schema: &FeatureSchema) -> FeatureVector {
    schema
        .features()
        .iter()
        .map(|feature| value(feature, raw))
        .collect::<Vec<_>>()
        .into()
}
