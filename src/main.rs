mod commands;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use reminders_core::config::RemindersConfig;
use reminders_core::format::Format;
use reminders_core::store::LocalStore;
use reminders_core::{GeoPoint, Proximity};
use tracing_subscriber::EnvFilter;

use commands::add::AddOptions;

#[derive(Parser, Debug)]
#[command(name = "reminders")]
#[command(about = "List and add reminders from the command line")]
struct Cli {
    /// Print debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List incomplete reminders
    Ls {
        /// List to show (defaults to the default list)
        #[arg(short, long)]
        calendar: Option<String>,

        /// Print one JSON document per reminder
        #[arg(short, long)]
        json: bool,
    },
    /// Add a reminder
    Add {
        /// List to add to (defaults to the default list)
        #[arg(short, long)]
        calendar: Option<String>,

        /// Due date: "H", "H:M", or "Nd" optionally followed by a time (e.g. "3d11:15")
        #[arg(short, long)]
        date: Option<String>,

        /// Latitude of a location alarm
        #[arg(long, requires = "longitude", allow_negative_numbers = true)]
        latitude: Option<f64>,

        /// Longitude of a location alarm
        #[arg(long, requires = "latitude", allow_negative_numbers = true)]
        longitude: Option<f64>,

        /// Radius of the location alarm in meters (defaults to location_radius from config)
        #[arg(long, requires = "latitude")]
        radius: Option<f64>,

        /// Fire the location alarm when leaving instead of arriving
        #[arg(long, requires = "latitude")]
        leave: bool,

        /// Reminder title
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },
    /// List all reminder lists
    Cal,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run(cli));
    // A store worker left behind by a timed-out wait must not hold up exit
    runtime.shutdown_background();
    result
}

async fn run(cli: Cli) -> Result<()> {
    let config = RemindersConfig::load()?;
    let store = LocalStore::from_config(&config);
    tracing::debug!(root = %store.root().display(), "opened store");

    commands::require_permission(&store).await?;

    match cli.command {
        Commands::Ls { calendar, json } => {
            commands::ls::run(&store, calendar.as_deref(), Format::from_json_flag(json)).await
        }
        Commands::Add {
            calendar,
            date,
            latitude,
            longitude,
            radius,
            leave,
            words,
        } => {
            let location = latitude
                .zip(longitude)
                .map(|(latitude, longitude)| GeoPoint { latitude, longitude });
            let options = AddOptions {
                words,
                calendar,
                date,
                location,
                radius: radius.unwrap_or(config.location_radius),
                proximity: if leave { Proximity::Leave } else { Proximity::Enter },
            };
            commands::add::run(&store, options, Local::now().naive_local())
        }
        Commands::Cal => commands::cal::run(&store),
    }
}

/// Log to stderr so stdout stays clean for listings. `RUST_LOG` overrides
/// the level picked by `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}
