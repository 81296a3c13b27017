use std::process::ExitCode;

use serde::Serialize;
use stationcal_core::tz::format_display_instant;
use stationcal_core::{Booking, DayKey, DropOutcome, Edge};

use crate::cli::{MoveArgs, SourceArgs};
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{ensure_no_error, open_session, parse_day, parse_edge, runtime};

#[derive(Debug, Serialize)]
struct MoveOutput {
    edge: Edge,
    to: DayKey,
    booking: Booking,
    persisted: bool,
}

pub fn run_move(
    source: &SourceArgs,
    args: MoveArgs,
    output_format: OutputFormat,
) -> CliResult<ExitCode> {
    let edge = parse_edge(&args.edge)?;
    let to = parse_day(&args.to)?;

    let mut session = open_session(source)?;
    let rt = runtime()?;
    rt.block_on(session.load_matching(&args.search));
    ensure_no_error(&session)?;

    // Pick the entry up from the day cell it is shown on.
    let tz = session.tz();
    let from = session
        .store()
        .bookings()
        .iter()
        .find(|b| b.id == args.booking_id)
        .map(|b| match edge {
            Edge::Start => b.start_day(tz),
            Edge::End => b.end_day(tz),
        })
        .ok_or_else(|| {
            CliError::input(format!(
                "Booking '{}' is not loaded for the selected station",
                args.booking_id
            ))
        })?;
    let entry = session
        .entries_for_day(from)
        .into_iter()
        .find(|e| e.booking.id == args.booking_id && e.edge == edge)
        .ok_or_else(|| CliError::runtime(format!("No {} entry on {}", edge, from)))?;

    session.begin_drag(entry);
    let outcome = rt.block_on(session.drop_on(to))?;

    let (booking, persisted) = match outcome {
        DropOutcome::Rescheduled { booking, persisted } => (booking, persisted),
        DropOutcome::NotDragging | DropOutcome::BookingGone { .. } => {
            return Err(CliError::runtime("Booking could not be moved"));
        }
    };

    let output = MoveOutput {
        edge,
        to,
        booking,
        persisted,
    };

    match output_format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| CliError::runtime(format!("Failed to serialize JSON: {}", e)))?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            let booking = &output.booking;
            println!("Moved {} of booking #{} to {}", output.edge, booking.id, output.to);
            println!("Customer: {}", booking.customer_name);
            println!("Start: {}", format_display_instant(booking.start_date, tz));
            println!("End: {}", format_display_instant(booking.end_date, tz));
            if booking.is_inverted() {
                println!("Warning: booking now ends before it starts");
            }
            if !output.persisted {
                println!("Warning: change was not saved remotely");
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}
