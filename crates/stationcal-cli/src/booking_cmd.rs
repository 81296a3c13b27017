use std::process::ExitCode;

use stationcal_core::tz::format_display_instant;

use crate::cli::{BookingArgs, SourceArgs};
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{ensure_no_error, open_session, runtime};

pub fn run_booking(
    source: &SourceArgs,
    args: BookingArgs,
    output_format: OutputFormat,
) -> CliResult<ExitCode> {
    let mut session = open_session(source)?;
    let booking =
        runtime()?.block_on(session.open_booking(&args.station_id, &args.booking_id));
    ensure_no_error(&session)?;
    let booking = booking.ok_or_else(|| CliError::runtime("Booking details unavailable"))?;

    match output_format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&booking)
                .map_err(|e| CliError::runtime(format!("Failed to serialize JSON: {}", e)))?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            let tz = session.tz();
            println!("Booking #{}", booking.id);
            println!("Customer: {}", booking.customer_name);
            println!(
                "Station: {}",
                booking.station_name.as_deref().unwrap_or_default()
            );
            println!("Start: {}", format_display_instant(booking.start_date, tz));
            println!("End: {}", format_display_instant(booking.end_date, tz));
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}
