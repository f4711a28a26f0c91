//! `booking` CLI - list open slots, create bookings and check conflicts.
//!
//! ## Usage
//!
//! ```sh
//! # List configured services
//! booking --config booking.toml services
//!
//! # Open slots for service 1 on a date (HH:MM strings)
//! booking --config booking.toml --ledger bookings.json slots 2023-10-15 1
//!
//! # Create a booking (rejected if it overlaps an existing one)
//! booking book --user 1 --service 1 --date 2023-10-15 --start 14:00:00 --end 15:00:00
//!
//! # List every booking in the ledger
//! booking bookings
//!
//! # Show which existing bookings a candidate interval would clash with
//! booking check --service 1 --date 2023-10-15 --start 14:30:00 --end 15:30:00
//! ```
//!
//! Logs go to stderr. Set `RUST_LOG` to override the filter, or pass
//! `--verbose` for debug output.

mod config;
mod store;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use booking_engine::{find_conflicts, parse_date, BookingInterval, BookingRequest, Catalog, HolidaySet};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::CatalogConfig;

#[derive(Parser)]
#[command(
    name = "booking",
    version,
    about = "Booking availability: open slots and conflict-checked bookings"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML catalog of services, weekly availability and holidays
    #[arg(short, long, global = true, default_value = "booking.toml")]
    config: PathBuf,

    /// JSON ledger file holding existing bookings (created on first booking)
    #[arg(short, long, global = true, default_value = "bookings.json")]
    ledger: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured services
    Services,
    /// List open slot start times for a service on a date
    Slots {
        /// Date (YYYY-MM-DD)
        date: String,
        /// Service id
        service_id: u64,
    },
    /// Create a booking after checking it against existing bookings
    Book {
        #[arg(long)]
        user: u64,
        #[arg(long)]
        service: u64,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Start time (HH:MM:SS)
        #[arg(long)]
        start: String,
        /// End time (HH:MM:SS)
        #[arg(long)]
        end: String,
    },
    /// List every booking in the ledger
    Bookings,
    /// Report existing bookings that a candidate interval overlaps
    Check {
        #[arg(long)]
        service: u64,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Start time (HH:MM:SS)
        #[arg(long)]
        start: String,
        /// End time (HH:MM:SS)
        #[arg(long)]
        end: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Services => {
            let (catalog, _) = load_catalog(&cli.config)?;
            let services: Vec<_> = catalog.services().collect();
            print_json(&services)?;
        }
        Commands::Slots { date, service_id } => {
            let date = parse_date(&date)?;
            let (catalog, holidays) = load_catalog(&cli.config)?;
            let ledger = store::load(&cli.ledger)?;

            let bookings = ledger.intervals_for(service_id, date);
            let slots = catalog.available_slots(service_id, date, &bookings, &holidays)?;
            let rendered: Vec<String> = slots.iter().map(|t| t.to_string()).collect();
            print_json(&rendered)?;
        }
        Commands::Book {
            user,
            service,
            date,
            start,
            end,
        } => {
            let request = BookingRequest {
                user_id: user,
                service_id: service,
                booking_date: date,
                start_time: start,
                end_time: end,
            };
            let booking = request.validate()?;

            let (catalog, _) = load_catalog(&cli.config)?;
            catalog.service(service)?;

            let created = store::update(&cli.ledger, |ledger| Ok(ledger.book(booking)?))?;

            print_json(&json!({
                "id": created.id,
                "message": "Booking created successfully",
            }))?;
        }
        Commands::Bookings => {
            let ledger = store::load(&cli.ledger)?;
            print_json(&ledger.all())?;
        }
        Commands::Check {
            service,
            date,
            start,
            end,
        } => {
            let date = parse_date(&date)?;
            let candidate = BookingInterval::parse(&start, &end)?;
            let ledger = store::load(&cli.ledger)?;

            let conflicts = find_conflicts(&candidate, &ledger.intervals_for(service, date));
            print_json(&json!({
                "overlap": !conflicts.is_empty(),
                "conflicts": conflicts,
            }))?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "booking_cli=debug,booking_engine=debug"
    } else {
        "booking_cli=info,booking_engine=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn load_catalog(path: &Path) -> Result<(Catalog, HolidaySet)> {
    CatalogConfig::load(path)?
        .build()
        .with_context(|| format!("Invalid catalog in {}", path.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
