use std::process::ExitCode;

use serde::Serialize;
use stationcal_core::Station;

use crate::cli::{SourceArgs, StationsArgs};
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{ensure_no_error, open_session, runtime};

#[derive(Debug, Serialize)]
struct StationsOutput {
    query: String,
    stations: Vec<Station>,
    selected: Option<Station>,
    bookings: usize,
}

pub fn run_stations(
    source: &SourceArgs,
    args: StationsArgs,
    output_format: OutputFormat,
) -> CliResult<ExitCode> {
    let mut session = open_session(source)?;
    let stations = runtime()?.block_on(session.search_stations(&args.query));
    ensure_no_error(&session)?;

    let output = StationsOutput {
        stations,
        selected: session.store().selected_station().cloned(),
        bookings: session.store().bookings().len(),
        query: args.query,
    };

    match output_format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| CliError::runtime(format!("Failed to serialize JSON: {}", e)))?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            if output.stations.is_empty() {
                println!("No stations match '{}'", output.query);
            }
            for station in &output.stations {
                println!("{}: {}", station.id, station.name);
            }
            if let Some(selected) = &output.selected {
                println!("Selected: {} ({} bookings)", selected.name, output.bookings);
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}
