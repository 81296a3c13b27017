use std::process::ExitCode;

use serde::Serialize;
use stationcal_core::{DayColumn, DayKey, Station};

use crate::cli::{SourceArgs, WeekArgs};
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{ensure_no_error, open_session, runtime};

#[derive(Debug, Serialize)]
struct WeekOutput {
    station: Option<Station>,
    range: String,
    anchor: DayKey,
    days: Vec<DayColumn>,
}

pub fn run_week(
    source: &SourceArgs,
    args: WeekArgs,
    output_format: OutputFormat,
) -> CliResult<ExitCode> {
    let mut session = open_session(source)?;
    runtime()?.block_on(session.load_matching(&args.search));
    ensure_no_error(&session)?;

    session.advance(args.weeks)?;

    let output = WeekOutput {
        station: session.store().selected_station().cloned(),
        range: session.display_range(),
        anchor: DayKey::new(session.window().current_anchor()),
        days: session.week_view(),
    };

    match output_format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| CliError::runtime(format!("Failed to serialize JSON: {}", e)))?;
            println!("{}", json);
        }
        OutputFormat::Text => print_week_text(&output),
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

fn print_week_text(output: &WeekOutput) {
    match &output.station {
        Some(station) => println!("Station: {}", station.name),
        None => println!("Station: (none)"),
    }
    println!("Week: {}", output.range);

    for column in &output.days {
        println!("{} {}", column.day.label, column.day.key);
        for entry in &column.entries {
            println!(
                "  {:<6} {} (#{})",
                entry.edge.to_string(),
                entry.booking.customer_name,
                entry.booking.id
            );
        }
    }
}
