use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Dimension, FuelMix, NumericField};

/// The parameters of a flight, as entered by a user.
/// Serialized with the human-readable names of each field (e.g. `Distance (km)`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FlightInput {
    #[serde(rename = "Aircraft Type")]
    pub aircraft_type: String,
    #[serde(rename = "Departure Airport")]
    pub departure_airport: String,
    #[serde(rename = "Arrival Airport")]
    pub arrival_airport: String,
    /// in km
    #[serde(rename = "Distance (km)")]
    pub distance: f64,
    /// in hours
    #[serde(rename = "Duration (hours)")]
    pub duration: f64,
    /// in feet
    #[serde(rename = "Cruising Altitude (ft)")]
    pub cruising_altitude: f64,
    /// in km/h
    #[serde(rename = "Wind Speed (km/h)")]
    pub wind_speed: f64,
    /// in °C, within `[-50, 50]`
    #[serde(rename = "Temperature (°C)")]
    pub temperature: f64,
    /// within `[0, 100]`
    #[serde(rename = "SAF Percentage")]
    pub saf_percentage: f64,
    /// within `[0, 100]`
    #[serde(rename = "Jet A-1 Percentage")]
    pub jet_a1_percentage: f64,
    /// in liters
    #[serde(rename = "Fuel Consumption (liters)")]
    pub fuel_consumption: f64,
    /// number of passengers
    #[serde(rename = "Passenger Load")]
    pub passenger_load: u32,
    /// in kg
    #[serde(rename = "Cargo Load (kg)")]
    pub cargo_load: f64,
}

const MIN_TEMPERATURE: f64 = -50.0;
const MAX_TEMPERATURE: f64 = 50.0;
const MAX_PERCENTAGE: f64 = 100.0;

fn clamp(name: &str, value: f64, min: f64, max: f64) -> f64 {
    let clamped = if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    };
    if clamped != value {
        log::warn!("{name} = {value} is outside [{min}, {max}]; using {clamped}");
    }
    clamped
}

impl FlightInput {
    pub fn category(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::AircraftType => &self.aircraft_type,
            Dimension::DepartureAirport => &self.departure_airport,
            Dimension::ArrivalAirport => &self.arrival_airport,
        }
    }

    /// Returns a copy of this input with every numeric field clamped to its allowed range.
    /// NaN is replaced by the lower bound.
    pub fn clamped(&self) -> Self {
        let non_negative = |field: NumericField, value: f64| clamp(field.name(), value, 0.0, f64::INFINITY);
        let percentage = |field: NumericField, value: f64| clamp(field.name(), value, 0.0, MAX_PERCENTAGE);
        Self {
            aircraft_type: self.aircraft_type.clone(),
            departure_airport: self.departure_airport.clone(),
            arrival_airport: self.arrival_airport.clone(),
            distance: non_negative(NumericField::Distance, self.distance),
            duration: non_negative(NumericField::Duration, self.duration),
            cruising_altitude: non_negative(NumericField::CruisingAltitude, self.cruising_altitude),
            wind_speed: non_negative(NumericField::WindSpeed, self.wind_speed),
            temperature: clamp(
                NumericField::Temperature.name(),
                self.temperature,
                MIN_TEMPERATURE,
                MAX_TEMPERATURE,
            ),
            saf_percentage: percentage(NumericField::SafPercentage, self.saf_percentage),
            jet_a1_percentage: percentage(NumericField::JetA1Percentage, self.jet_a1_percentage),
            fuel_consumption: non_negative(NumericField::FuelConsumption, self.fuel_consumption),
            passenger_load: self.passenger_load,
            cargo_load: non_negative(NumericField::CargoLoad, self.cargo_load),
        }
    }
}

/// The values of a single prediction request, keyed by field.
/// Created per request and discarded afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawInput {
    numeric: HashMap<NumericField, f64>,
    categories: HashMap<Dimension, String>,
}

impl RawInput {
    /// Merges a flight with the fuel mix to encode (normalized, or raw when the
    /// percentages exceeded 100%).
    pub fn new(input: &FlightInput, mix: FuelMix) -> Self {
        let numeric = [
            (NumericField::Distance, input.distance),
            (NumericField::Duration, input.duration),
            (NumericField::CruisingAltitude, input.cruising_altitude),
            (NumericField::WindSpeed, input.wind_speed),
            (NumericField::Temperature, input.temperature),
            (NumericField::SafPercentage, mix.saf),
            (NumericField::JetA1Percentage, mix.jet_a1),
            (NumericField::FuelConsumption, input.fuel_consumption),
            (NumericField::PassengerLoad, input.passenger_load as f64),
            (NumericField::CargoLoad, input.cargo_load),
        ]
        .into_iter()
        .collect();
        let categories = Dimension::ALL
            .into_iter()
            .map(|dimension| (dimension, input.category(dimension).to_string()))
            .collect();
        Self {
            numeric,
            categories,
        }
    }

    pub fn with_numeric(mut self, field: NumericField, value: f64) -> Self {
        self.numeric.insert(field, value);
        self
    }

    pub fn with_category(mut self, dimension: Dimension, value: impl Into<String>) -> Self {
        self.categories.insert(dimension, value.into());
        self
    }

    pub fn numeric(&self, field: NumericField) -> Option<f64> {
        self.numeric.get(&field).copied()
    }

    pub fn category(&self, dimension: Dimension) -> Option<&str> {
        self.categories.get(&dimension).map(|x| x.as_str())
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    pub(crate) fn flight() -> FlightInput {
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

    #[test]
    fn clamped_within_range_is_unchanged() {
        assert_eq!(flight().clamped(), flight());
    }

    #[test]
    fn clamped() {
        let input = FlightInput {
            distance: -1.0,
            temperature: 70.0,
            saf_percentage: 130.0,
            wind_speed: f64::NAN,
            ..flight()
        }
        .clamped();
        assert_eq!(input.distance, 0.0);
        assert_eq!(input.temperature, 50.0);
        assert_eq!(input.saf_percentage, 100.0);
        assert_eq!(input.wind_speed, 0.0);
    }

    #[test]
    fn raw_input() {
        let raw = RawInput::new(&flight(), FuelMix { saf: 0.2, jet_a1: 0.8 });
        assert_eq!(raw.numeric(NumericField::Distance), Some(5540.0));
        assert_eq!(raw.numeric(NumericField::SafPercentage), Some(0.2));
        assert_eq!(raw.numeric(NumericField::PassengerLoad), Some(150.0));
        assert_eq!(raw.category(Dimension::DepartureAirport), Some("JFK"));
    }

    #[test]
    fn deserialize_csv_row() {
        let data = "Aircraft Type,Departure Airport,Arrival Airport,Distance (km),Duration (hours),Cruising Altitude (ft),Wind Speed (km/h),Temperature (°C),SAF Percentage,Jet A-1 Percentage,Fuel Consumption (liters),Passenger Load,Cargo Load (kg)
A320,JFK,LHR,5540,7,36000,40,-10,20,80,21000,150,2500
";
        let rows = crate::csv::deserialize::<FlightInput>(data.as_bytes())
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(rows, vec![flight()]);
    }
}
