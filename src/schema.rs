use std::{collections::HashSet, error::Error, sync::Arc};

use serde::Deserialize;

/// A categorical dimension of a flight, encoded one-hot in the feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    AircraftType,
    DepartureAirport,
    ArrivalAirport,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [
        Dimension::AircraftType,
        Dimension::DepartureAirport,
        Dimension::ArrivalAirport,
    ];

    /// The human-readable name of the dimension (e.g. `Aircraft Type`)
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::AircraftType => "Aircraft Type",
            Dimension::DepartureAirport => "Departure Airport",
            Dimension::ArrivalAirport => "Arrival Airport",
        }
    }

    /// The prefix of the one-hot features of this dimension (e.g. `Aircraft Type_`)
    pub fn prefix(&self) -> &'static str {
        match self {
            Dimension::AircraftType => "Aircraft Type_",
            Dimension::DepartureAirport => "Departure Airport_",
            Dimension::ArrivalAirport => "Arrival Airport_",
        }
    }

    /// The name of the one-hot feature of `value` (e.g. `Aircraft Type_A320`)
    pub fn one_hot_name(&self, value: &str) -> String {
        format!("{}{value}", self.prefix())
    }
}

/// A numeric field of a flight, passed to the model as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    Distance,
    Duration,
    CruisingAltitude,
    WindSpeed,
    Temperature,
    SafPercentage,
    JetA1Percentage,
    FuelConsumption,
    PassengerLoad,
    CargoLoad,
}

impl NumericField {
    pub const ALL: [NumericField; 10] = [
        NumericField::Distance,
        NumericField::Duration,
        NumericField::CruisingAltitude,
        NumericField::WindSpeed,
        NumericField::Temperature,
        NumericField::SafPercentage,
        NumericField::JetA1Percentage,
        NumericField::FuelConsumption,
        NumericField::PassengerLoad,
        NumericField::CargoLoad,
    ];

    /// The name of this field in the feature schema
    pub fn name(&self) -> &'static str {
        match self {
            NumericField::Distance => "Distance (km)",
            NumericField::Duration => "Duration (hours)",
            NumericField::CruisingAltitude => "Cruising Altitude (ft)",
            NumericField::WindSpeed => "Wind Speed (km/h)",
            NumericField::Temperature => "Temperature (°C)",
            NumericField::SafPercentage => "SAF Percentage",
            NumericField::JetA1Percentage => "Jet A-1 Percentage",
            NumericField::FuelConsumption => "Fuel Consumption (liters)",
            NumericField::PassengerLoad => "Passenger Load",
            NumericField::CargoLoad => "Cargo Load (kg)",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

/// A slot of the feature vector, resolved from its name once when the schema is built.
#[derive(Debug, Clone, PartialEq)]
pub enum Feature {
    Numeric(NumericField),
    /// One-hot slot, 1 when the flight's `dimension` equals `value`
    Categorical {
        dimension: Dimension,
        value: Arc<str>,
    },
    /// A name no rule recognizes. Always 0.
    Unknown(Arc<str>),
}

impl Feature {
    /// Resolves a schema name into a [`Feature`].
    /// Numeric names take precedence over one-hot prefixes.
    pub fn resolve(name: &str) -> Self {
        if let Some(field) = NumericField::from_name(name) {
            return Feature::Numeric(field);
        }
        Dimension::ALL
            .into_iter()
            .find_map(|dimension| {
                name.strip_prefix(dimension.prefix())
                    .map(|value| Feature::Categorical {
                        dimension,
                        value: value.into(),
                    })
            })
            .unwrap_or_else(|| Feature::Unknown(name.into()))
    }
}

/// The ordered list of features the model was trained on.
/// The order of the slots is the order of the feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    names: Vec<Arc<str>>,
    features: Vec<Feature>,
}

impl FeatureSchema {
    pub fn new<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Self {
        let names = names
            .into_iter()
            .map(|name| Arc::<str>::from(name.as_ref()))
            .collect::<Vec<_>>();
        let features = names.iter().map(|name| Feature::resolve(name)).collect();
        Self { names, features }
    }

    /// Returns this schema with every one-hot slot whose category is not in
    /// `vocabulary` resolved to [`Feature::Unknown`], so that it is always 0.
    pub fn restrict(self, vocabulary: &Vocabulary) -> Self {
        let features = self
            .names
            .iter()
            .zip(self.features)
            .map(|(name, feature)| match feature {
                Feature::Categorical { dimension, value }
                    if !vocabulary.contains(dimension, &value) =>
                {
                    Feature::Unknown(name.clone())
                }
                feature => feature,
            })
            .collect();
        Self {
            names: self.names,
            features,
        }
    }

    pub fn names(&self) -> &[Arc<str>] {
        &self.names
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// The known categories of each [`Dimension`]
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    pub aircraft_types: Vec<Arc<str>>,
    pub departure_airports: Vec<Arc<str>>,
    pub arrival_airports: Vec<Arc<str>>,
}

impl Vocabulary {
    pub fn values(&self, dimension: Dimension) -> &[Arc<str>] {
        match dimension {
            Dimension::AircraftType => &self.aircraft_types,
            Dimension::DepartureAirport => &self.departure_airports,
            Dimension::ArrivalAirport => &self.arrival_airports,
        }
    }

    pub fn contains(&self, dimension: Dimension, value: &str) -> bool {
        self.values(dimension).iter().any(|v| v.as_ref() == value)
    }

    /// The one-hot feature names of `dimension`, in vocabulary order
    pub fn one_hot_names(&self, dimension: Dimension) -> impl Iterator<Item = String> + '_ {
        self.values(dimension)
            .iter()
            .map(move |value| dimension.one_hot_name(value))
    }
}

/// A mismatch between the [`Vocabulary`] and the [`FeatureSchema`].
/// Mismatches are not errors: they result in zero-filled one-hot features.
#[derive(Debug, Clone, PartialEq)]
pub enum Drift {
    /// a category the user can select but the model has no feature for
    MissingFeature { dimension: Dimension, value: Arc<str> },
    /// a one-hot feature the user can never select
    UnselectableFeature { dimension: Dimension, value: Arc<str> },
    /// a feature no rule recognizes
    UnknownFeature(Arc<str>),
}

impl std::fmt::Display for Drift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFeature { dimension, value } => write!(
                f,
                "{} \"{value}\" has no feature in the schema",
                dimension.label()
            ),
            Self::UnselectableFeature { dimension, value } => write!(
                f,
                "feature \"{}\" is not in the vocabulary",
                dimension.one_hot_name(value)
            ),
            Self::UnknownFeature(name) => write!(f, "feature \"{name}\" is not recognized"),
        }
    }
}

#[derive(Deserialize)]
struct FeatureSetFile {
    all_features: Vec<String>,
    #[serde(flatten)]
    vocabulary: Vocabulary,
}

/// The [`FeatureSchema`] and [`Vocabulary`] a model was trained against.
/// Loaded once and read-only afterwards.
/// # Implementation
/// One-hot slots of categories outside the vocabulary are never encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    schema: FeatureSchema,
    vocabulary: Vocabulary,
}

impl FeatureSet {
    pub fn new(schema: FeatureSchema, vocabulary: Vocabulary) -> Self {
        Self {
            schema: schema.restrict(&vocabulary),
            vocabulary,
        }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Returns every mismatch between the vocabulary and the schema
    pub fn drift(&self) -> Vec<Drift> {
        let mut slots = HashSet::new();
        let mut drift = vec![];
        for name in self.schema.names() {
            match Feature::resolve(name) {
                Feature::Numeric(_) => {}
                Feature::Categorical { dimension, value } => {
                    if !self.vocabulary.contains(dimension, &value) {
                        drift.push(Drift::UnselectableFeature {
                            dimension,
                            value: value.clone(),
                        });
                    }
                    slots.insert((dimension, value));
                }
                Feature::Unknown(name) => drift.push(Drift::UnknownFeature(name)),
            }
        }
        for dimension in Dimension::ALL {
            for value in self.vocabulary.values(dimension) {
                if !slots.contains(&(dimension, value.clone())) {
                    drift.push(Drift::MissingFeature {
                        dimension,
                        value: value.clone(),
                    });
                }
            }
        }
        drift
    }
}

/// Parses a [`FeatureSet`] from its JSON representation, with the keys
/// `all_features`, `aircraft_types`, `departure_airports` and `arrival_airports`.
pub fn parse_feature_set(data: &[u8]) -> Result<FeatureSet, serde_json::Error> {
    let file: FeatureSetFile = serde_json::from_slice(data)?;
    Ok(FeatureSet::new(
        FeatureSchema::new(file.all_features),
        file.vocabulary,
    ))
}

/// Loads a [`FeatureSet`] from a JSON file (e.g. `src/features.json`).
/// Mismatches between the schema and the vocabulary are logged, not returned.
/// # Error
/// Errors if the file cannot be read or parsed
pub fn load_feature_set(path: &str) -> Result<FeatureSet, Box<dyn Error>> {
    let data = std::fs::read(path)?;
    let set = parse_feature_set(&data)?;
    log::info!(
        "{path} - {} features, {} aircraft types, {} departure airports, {} arrival airports",
        set.schema().len(),
        set.vocabulary.aircraft_types.len(),
        set.vocabulary.departure_airports.len(),
        set.vocabulary.arrival_airports.len(),
    );
    for drift in set.drift() {
        log::warn!("{path} - {drift}");
    }
    Ok(set)
}
