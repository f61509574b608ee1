use std::error::Error;

use clap::Parser;
use itertools::Itertools;
use simple_logger::SimpleLogger;
use tinytemplate::TinyTemplate;

use flight_emissions::*;

static TEMPLATE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/src/bin/predict_template.md"
));
static TEMPLATE_NAME: &'static str = "t";

const ABOUT: &'static str = r#"Estimates the CO₂ emissions of a single flight using a pre-trained model
and writes a markdown summary of the inputs and the estimate to stdout.
The model and its features are loaded from `--model` and `--features`.
"#;

#[derive(Parser, Debug)]
#[command(author, version, about = ABOUT)]
struct Cli {
    /// The aircraft type (e.g. `A320`)
    #[arg(long)]
    aircraft_type: String,
    /// The departure airport (e.g. `JFK`)
    #[arg(long)]
    departure_airport: String,
    /// The arrival airport (e.g. `LHR`)
    #[arg(long)]
    arrival_airport: String,
    /// Distance in km
    #[arg(long, default_value_t = 0.0)]
    distance: f64,
    /// Duration in hours
    #[arg(long, default_value_t = 0.0)]
    duration: f64,
    /// Cruising altitude in ft
    #[arg(long, default_value_t = 0.0)]
    cruising_altitude: f64,
    /// Wind speed in km/h
    #[arg(long, default_value_t = 0.0)]
    wind_speed: f64,
    /// Temperature in °C, in [-50, 50]
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    temperature: f64,
    /// Percentage of sustainable aviation fuel, in [0, 100]
    #[arg(long, default_value_t = 0.0)]
    saf_percentage: f64,
    /// Percentage of Jet A-1, in [0, 100]
    #[arg(long, default_value_t = 0.0)]
    jet_a1_percentage: f64,
    /// Fuel consumption in liters
    #[arg(long, default_value_t = 0.0)]
    fuel_consumption: f64,
    /// Number of passengers
    #[arg(long, default_value_t = 0)]
    passenger_load: u32,
    /// Cargo load in kg
    #[arg(long, default_value_t = 0.0)]
    cargo_load: f64,

    /// Path to the features (schema and vocabulary) the model was trained against
    #[arg(long, default_value = "src/features.json")]
    features: String,
    /// Path to the model
    #[arg(long, default_value = "src/model.json")]
    model: String,
}

impl Cli {
    fn flight(&self) -> FlightInput {
        FlightInput {
            aircraft_type: self.aircraft_type.clone(),
            departure_airport: self.departure_airport.clone(),
            arrival_airport: self.arrival_airport.clone(),
            distance: self.distance,
            duration: self.duration,
            cruising_altitude: self.cruising_altitude,
            wind_speed: self.wind_speed,
            temperature: self.temperature,
            saf_percentage: self.saf_percentage,
            jet_a1_percentage: self.jet_a1_percentage,
            fuel_consumption: self.fuel_consumption,
            passenger_load: self.passenger_load,
            cargo_load: self.cargo_load,
        }
    }
}

#[derive(serde::Serialize)]
struct Context {
    aircraft_type: String,
    departure_airport: String,
    arrival_airport: String,
    distance: f64,
    duration: f64,
    cruising_altitude: f64,
    wind_speed: f64,
    temperature: f64,
    saf_percentage: f64,
    jet_a1_percentage: f64,
    fuel_consumption: f64,
    passenger_load: u32,
    cargo_load: f64,
    warning: Option<String>,
    mix: Option<String>,
    result: String,
}

impl Context {
    fn new(input: FlightInput, result: &Result<Estimate, PredictionFailure>) -> Self {
        let (warning, mix, result) = match result {
            Ok(estimate) => (
                estimate.warning.map(|w| w.to_string()),
                Some(format!(
                    "SAF {:.4}, Jet A-1 {:.4}",
                    estimate.mix.saf, estimate.mix.jet_a1
                )),
                estimate.to_string(),
            ),
            Err(e) => (None, None, e.to_string()),
        };
        Self {
            aircraft_type: input.aircraft_type,
            departure_airport: input.departure_airport,
            arrival_airport: input.arrival_airport,
            distance: input.distance,
            duration: input.duration,
            cruising_altitude: input.cruising_altitude,
            wind_speed: input.wind_speed,
            temperature: input.temperature,
            saf_percentage: input.saf_percentage,
            jet_a1_percentage: input.jet_a1_percentage,
            fuel_consumption: input.fuel_consumption,
            passenger_load: input.passenger_load,
            cargo_load: input.cargo_load,
            warning,
            mix,
            result,
        }
    }
}

fn render(context: &Context) -> Result<String, Box<dyn Error>> {
    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template(TEMPLATE_NAME, TEMPLATE)?;

    Ok(tt.render(TEMPLATE_NAME, context)?)
}

pub fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    let cli = Cli::parse();

    let features = load_feature_set(&cli.features)?;
    let model = load_model(&cli.model)?;

    let input = cli.flight().clamped();
    for dimension in Dimension::ALL {
        let value = input.category(dimension);
        if !features.vocabulary().contains(dimension, value) {
            log::warn!(
                "{} \"{value}\" is unknown and will not be encoded. Known values: {}",
                dimension.label(),
                features.vocabulary().values(dimension).iter().join(", ")
            );
        }
    }

    let estimator = Estimator::new(&features, model);
    let result = estimator.estimate(&input);

    println!("{}", render(&Context::new(input, &result))?);

    result?;
    Ok(())
}
