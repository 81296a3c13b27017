use clap::{Parser, Subcommand};

/// Base URL of the hosted mock stations/bookings API.
pub const DEFAULT_BASE_URL: &str = "https://605c94c36d85de00170da8b4.mockapi.io";

/// Week-by-week booking calendar for rental stations
#[derive(Parser, Debug)]
#[command(name = "stationcal")]
#[command(about = "Week-by-week booking calendar for rental stations")]
pub struct Cli {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args, Debug)]
pub struct SourceArgs {
    /// Base URL of the stations/bookings API
    #[arg(long, env = "STATIONCAL_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Serve stations and bookings from a JSON fixture file instead of the API
    #[arg(long, global = true)]
    pub fixture: Option<String>,

    /// IANA timezone that decides which calendar day a timestamp falls on
    #[arg(short, long, default_value = "UTC", global = true)]
    pub tz: String,

    /// Enable verbose (debug) logging
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the calendar week of a station
    Week(WeekArgs),
    /// Search stations and select the first match
    Stations(StationsArgs),
    /// Show one booking with its station name
    Booking(BookingArgs),
    /// Move the start or end of a booking to another day
    Move(MoveArgs),
}

#[derive(clap::Args, Debug)]
pub struct WeekArgs {
    /// Station search query; the first match is shown
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Weeks to move from the earliest booking (negative moves back)
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub weeks: i64,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct StationsArgs {
    /// Station search query (empty matches all)
    #[arg(default_value = "")]
    pub query: String,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct BookingArgs {
    /// Station the booking belongs to
    #[arg(long)]
    pub station_id: String,

    /// Booking id
    #[arg(long)]
    pub booking_id: String,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct MoveArgs {
    /// Booking id
    #[arg(long)]
    pub booking_id: String,

    /// Edge to move: start, end
    #[arg(long)]
    pub edge: String,

    /// Target day (yyyy-MM-dd)
    #[arg(long)]
    pub to: String,

    /// Station search query; the booking must belong to the first match
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}
