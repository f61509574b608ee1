use std::{error::Error, io::Write};

use clap::Parser;
use simple_logger::SimpleLogger;

use flight_emissions::*;

const ABOUT: &'static str = r#"Estimates the CO₂ emissions of every flight in a CSV file and writes one row
per flight to stdout, with columns `flight`, `aircraft_type`, `departure_airport`,
`arrival_airport`, `emissions`, `warning` and `error`.
The input CSV has one column per flight parameter, e.g. `Distance (km)`.
Rows that cannot be parsed are reported as errors and do not stop the batch.
"#;

#[derive(Parser, Debug)]
#[command(author, version, about = ABOUT)]
struct Cli {
    /// Path to the CSV of flights
    #[arg(short, long)]
    input: String,
    /// Path to the features (schema and vocabulary) the model was trained against
    #[arg(long, default_value = "src/features.json")]
    features: String,
    /// Path to the model
    #[arg(long, default_value = "src/model.json")]
    model: String,
}

#[derive(serde::Serialize, Debug, Default)]
struct Row {
    /// The (0-based) position of the flight in the input
    flight: usize,
    aircraft_type: String,
    departure_airport: String,
    arrival_airport: String,
    /// The estimate, with 2 decimals
    emissions: Option<String>,
    warning: Option<String>,
    error: Option<String>,
}

fn estimate<P: Predictor>(
    flight: usize,
    input: Result<FlightInput, ::csv::Error>,
    estimator: &Estimator<P>,
) -> Row {
    let input = match input {
        Ok(input) => input.clamped(),
        Err(e) => {
            log::error!("flight {flight} - {e}");
            return Row {
                flight,
                error: Some(e.to_string()),
                ..Default::default()
            };
        }
    };
    let (emissions, warning, error) = match estimator.estimate(&input) {
        Ok(estimate) => (
            Some(format!("{:.2}", estimate.emissions)),
            estimate.warning.map(|w| w.to_string()),
            None,
        ),
        Err(e) => {
            log::error!("flight {flight} - {e}");
            (None, None, Some(e.to_string()))
        }
    };
    Row {
        flight,
        aircraft_type: input.aircraft_type,
        departure_airport: input.departure_airport,
        arrival_airport: input.arrival_airport,
        emissions,
        warning,
        error,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    let cli = Cli::parse();

    let features = load_feature_set(&cli.features)?;
    let model = load_model(&cli.model)?;
    let estimator = Estimator::new(&features, model);

    let data = std::fs::read(&cli.input)?;
    let rows = flight_emissions::csv::deserialize::<FlightInput>(&data)
        .enumerate()
        .map(|(flight, input)| estimate(flight, input, &estimator))
        .collect::<Vec<_>>();

    let failed = rows.iter().filter(|row| row.error.is_some()).count();
    log::info!("{} flights estimated, {failed} failed", rows.len() - failed);

    std::io::stdout().write_all(&flight_emissions::csv::serialize(rows.iter())?)?;
    Ok(())
}
