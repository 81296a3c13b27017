use std::fs;

use anyhow::Context;
use chrono_tz::Tz;
use stationcal_core::{BookingApi, CalendarSession, DayKey, Edge, LoggingPersister, MemoryApi};

use crate::cli::SourceArgs;
use crate::error::{CliError, CliResult};
use crate::http::HttpApi;

pub type Session = CalendarSession<Box<dyn BookingApi>, LoggingPersister>;

pub fn parse_tz_or_input_error(name: &str) -> CliResult<Tz> {
    stationcal_core::tz::parse_tz(name)
        .map_err(|e| CliError::input(format!("Invalid timezone '{}': {}", name, e)))
}

pub fn parse_day(s: &str) -> CliResult<DayKey> {
    s.parse()
        .map_err(|e| CliError::input(format!("Invalid day '{}': {}", s, e)))
}

pub fn parse_edge(s: &str) -> CliResult<Edge> {
    s.parse()
        .map_err(|_| CliError::input(format!("Invalid edge '{}'. Expected: start, end", s)))
}

pub fn load_fixture(path: &str) -> anyhow::Result<MemoryApi> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read fixture: {path}"))?;
    let api = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse fixture: {path}"))?;
    Ok(api)
}

/// The collaborator selected by the source flags.
pub fn open_api(source: &SourceArgs) -> CliResult<Box<dyn BookingApi>> {
    match &source.fixture {
        Some(path) => {
            let api = load_fixture(path).map_err(|e| CliError::runtime(format!("{e:#}")))?;
            Ok(Box::new(api))
        }
        None => Ok(Box::new(HttpApi::new(source.base_url.clone()))),
    }
}

pub fn open_session(source: &SourceArgs) -> CliResult<Session> {
    let tz = parse_tz_or_input_error(&source.tz)?;
    let api = open_api(source)?;
    Ok(CalendarSession::new(api, LoggingPersister, tz))
}

/// Turn the session's recorded error, if any, into a command failure.
pub fn ensure_no_error(session: &Session) -> CliResult<()> {
    match session.error_message() {
        Some(message) => Err(CliError::runtime(message)),
        None => Ok(()),
    }
}

pub fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::runtime(format!("Failed to start runtime: {}", e)))
}
