use std::error::Error;

use flight_emissions::*;

fn abs_difference<T: std::ops::Sub<Output = T> + PartialOrd>(x: T, y: T) -> T {
    if x < y {
        y - x
    } else {
        x - y
    }
}

fn flight() -> FlightInput {
    FlightInput {
        aircraft_type: "A320".to_string(),
        departure_airport: "JFK".to_string(),
        arrival_airport: "LHR".to_string(),
        distance: 5540.0,
        duration: 7.0,
        cruising_altitude: 36000.0,
        wind_speed: 40.0,
        temperature: -10.0,
        saf_percentage: 20.0,
        jet_a1_percentage: 80.0,
        fuel_consumption: 21000.0,
        passenger_load: 150,
        cargo_load: 2500.0,
    }
}

/// Verifies that the shipped features and model are consistent with each other
#[test]
fn artifacts_are_aligned() -> Result<(), Box<dyn Error>> {
    let features = load_feature_set("src/features.json")?;
    let model = load_model("src/model.json")?;

    assert_eq!(features.schema().len(), model.coefficients.len());
    assert!(features.drift().is_empty());
    for dimension in Dimension::ALL {
        for name in features.vocabulary().one_hot_names(dimension) {
            assert!(features.schema().names().iter().any(|n| n.as_ref() == name));
        }
    }
    Ok(())
}

/// Verifies the estimate of a JFK -> LHR flight against the value computed
/// by hand from the coefficients in `src/model.json`.
#[test]
fn acceptance_estimate() -> Result<(), Box<dyn Error>> {
    let features = load_feature_set("src/features.json")?;
    let model = load_model("src/model.json")?;
    let estimator = Estimator::new(&features, &model);

    let estimate = estimator.estimate(&flight())?;
    assert!(estimate.warning.is_none());
    assert!(abs_difference(estimate.emissions, 54953.9) < 1e-6);
    assert_eq!(estimate.to_string(), "Predicted CO₂ Emissions: 54953.90 units");
    Ok(())
}

/// Percentages over 100% are passed to the model as-is, with a warning
#[test]
fn exceeded_percentages() -> Result<(), Box<dyn Error>> {
    let features = load_feature_set("src/features.json")?;
    let model = load_model("src/model.json")?;
    let estimator = Estimator::new(&features, &model);

    let input = FlightInput {
        saf_percentage: 60.0,
        jet_a1_percentage: 60.0,
        ..flight()
    };
    let estimate = estimator.estimate(&input)?;
    assert!(estimate.warning.is_some());
    assert_eq!(estimate.mix, FuelMix { saf: 60.0, jet_a1: 60.0 });
    assert!(abs_difference(estimate.emissions, -46796.1) < 1e-6);
    Ok(())
}

/// A category that is not in the vocabulary is not encoded
#[test]
fn unknown_aircraft() -> Result<(), Box<dyn Error>> {
    let features = load_feature_set("src/features.json")?;
    let model = load_model("src/model.json")?;

    let input = FlightInput {
        aircraft_type: "A380".to_string(),
        ..flight()
    };
    let normalized = normalize(input.saf_percentage, input.jet_a1_percentage);
    let vector = build(&RawInput::new(&input, normalized.mix), features.schema());
    assert_eq!(vector.len(), features.schema().len());
    let active = features
        .schema()
        .features()
        .iter()
        .zip(vector.as_slice())
        .filter(|(feature, value)| {
            matches!(feature, Feature::Categorical { .. }) && **value == 1.0
        })
        .count();
    assert_eq!(active, 2);

    let estimate = Estimator::new(&features, &model).estimate(&input)?;
    assert!(abs_difference(estimate.emissions, 55073.9) < 1e-6);
    Ok(())
}

/// A one-hot slot whose category is not in the vocabulary is never encoded,
/// even when that category is selected
#[test]
fn category_outside_vocabulary() -> Result<(), Box<dyn Error>> {
    let features = parse_feature_set(
        br#"{
            "all_features": ["Aircraft Type_A320", "Aircraft Type_A380"],
            "aircraft_types": ["A320"],
            "departure_airports": [],
            "arrival_airports": []
        }"#,
    )?;
    assert!(!features.vocabulary().contains(Dimension::AircraftType, "A380"));

    let input = FlightInput {
        aircraft_type: "A380".to_string(),
        ..flight()
    };
    let vector = build(&RawInput::new(&input, FuelMix { saf: 0.2, jet_a1: 0.8 }), features.schema());
    assert_eq!(vector.as_slice(), &[0.0, 0.0]);

    let input = FlightInput {
        aircraft_type: "A320".to_string(),
        ..flight()
    };
    let vector = build(&RawInput::new(&input, FuelMix { saf: 0.2, jet_a1: 0.8 }), features.schema());
    assert_eq!(vector.as_slice(), &[1.0, 0.0]);
    Ok(())
}

/// A model trained on a different schema fails to predict
#[test]
fn mismatched_model() -> Result<(), Box<dyn Error>> {
    let features = load_feature_set("src/features.json")?;
    let model = LinearModel {
        intercept: 0.0,
        coefficients: vec![1.0; 3],
    };

    let e = Estimator::new(&features, model)
        .estimate(&flight())
        .unwrap_err();
    assert_eq!(
        e.to_string(),
        "Error making prediction: X has 34 features, but the model is expecting 3 features as input"
    );
    Ok(())
}

#[test]
fn batch_of_flights() -> Result<(), Box<dyn Error>> {
    let features = load_feature_set("src/features.json")?;
    let model = load_model("src/model.json")?;
    let estimator = Estimator::new(&features, &model);

    let data = flight_emissions::csv::serialize([flight(), flight()].iter())?;
    let estimates = flight_emissions::csv::deserialize::<FlightInput>(&data)
        .map(|input| Ok::<_, Box<dyn Error>>(estimator.estimate(&input?)?.emissions))
        .collect::<Result<Vec<_>, _>>()?;

    assert_eq!(estimates.len(), 2);
    assert_eq!(estimates[0].to_bits(), estimates[1].to_bits());
    Ok(())
}
