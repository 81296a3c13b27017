use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

mod booking_cmd;
mod cli;
mod error;
mod http;
mod move_cmd;
mod shared;
mod stations_cmd;
mod week_cmd;

use booking_cmd::run_booking;
use cli::{Cli, Commands};
use error::{CliResult, OutputFormat, output_format_hint, parse_output_format, render_error};
use move_cmd::run_move;
use stations_cmd::run_stations;
use week_cmd::run_week;

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch<F>(raw_format: &str, run: F) -> ExitCode
where
    F: FnOnce(OutputFormat) -> CliResult<ExitCode>,
{
    let fallback = output_format_hint(raw_format);
    let output_format = match parse_output_format(raw_format) {
        Ok(format) => format,
        Err(err) => return render_error(&err, fallback),
    };

    match run(output_format) {
        Ok(code) => code,
        Err(err) => render_error(&err, output_format),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.source.verbose);
    debug!("Parsed CLI args: {:?}", cli);

    let source = &cli.source;
    match cli.command {
        Commands::Week(args) => {
            let raw = args.output_format.clone();
            dispatch(&raw, |format| run_week(source, args, format))
        }
        Commands::Stations(args) => {
            let raw = args.output_format.clone();
            dispatch(&raw, |format| run_stations(source, args, format))
        }
        Commands::Booking(args) => {
            let raw = args.output_format.clone();
            dispatch(&raw, |format| run_booking(source, args, format))
        }
        Commands::Move(args) => {
            let raw = args.output_format.clone();
            dispatch(&raw, |format| run_move(source, args, format))
        }
    }
}
