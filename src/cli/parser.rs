use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rhoslogger
/// CLI application to record duty status and evaluate HOS limits with SQLite
#[derive(Parser)]
#[command(
    name = "rhoslogger",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple HOS logging CLI: record duty-status changes and evaluate FMCSA limits using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },

    /// Manage the database (migrations, integrity checks, retention, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,

        #[arg(
            long = "prune",
            help = "Delete closed records older than the retention window"
        )]
        prune: bool,
    },

    /// Print the internal audit log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Record a duty-status change for a driver
    Change {
        /// Driver identifier
        driver: String,

        /// New duty status (OFF, SB, D, ON)
        status: String,

        /// Timestamp of the change (YYYY-MM-DD HH:MM[:SS]); defaults to now
        #[arg(long = "at", help = "Timestamp of the change, defaults to now")]
        at: Option<String>,

        /// Position as "lat,lon"
        #[arg(long = "pos", help = "Geoposition of the change as lat,lon")]
        pos: Option<String>,

        /// Tag the change as automatically detected instead of manual
        #[arg(long = "auto", help = "Mark the change as detected automatically")]
        auto: bool,
    },

    /// Correct a closed record by appending a superseding one
    Correct {
        /// Driver identifier
        driver: String,

        /// Id of the record to supersede
        #[arg(long = "record", help = "Id of the record to correct")]
        record: i64,

        #[arg(long = "status", help = "Corrected duty status (OFF, SB, D, ON)")]
        status: Option<String>,

        #[arg(long = "start", help = "Corrected start timestamp")]
        start: Option<String>,

        #[arg(long = "end", help = "Corrected end timestamp")]
        end: Option<String>,

        #[arg(long = "pos", help = "Corrected geoposition as lat,lon")]
        pos: Option<String>,

        #[arg(long = "reason", help = "Why the record is being corrected")]
        reason: Option<String>,
    },

    /// List duty records
    List {
        /// Driver identifier (falls back to default_driver from config)
        driver: Option<String>,

        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long = "status", help = "Filter by duty status (OFF, SB, D, ON)")]
        status: Option<String>,

        #[arg(long = "raw", help = "Include superseded records")]
        raw: bool,
    },

    /// Evaluate HOS compliance and upcoming warnings for a driver
    Status {
        /// Driver identifier (falls back to default_driver from config)
        driver: Option<String>,

        /// Evaluation instant (YYYY-MM-DD HH:MM[:SS]); defaults to now
        #[arg(long = "at", help = "Evaluation instant, defaults to now")]
        at: Option<String>,

        #[arg(long = "json", help = "Print the snapshot as JSON")]
        json: bool,
    },

    /// Ingest telemetry samples and auto-detect duty transitions
    Ingest {
        /// Driver identifier
        driver: String,

        /// CSV file with columns: ts,speed_mph,engine_on[,lat,lon]
        #[arg(long, value_name = "FILE")]
        file: String,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Export duty records
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Limit the export to one driver")]
        driver: Option<String>,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
