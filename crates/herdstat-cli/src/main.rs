mod commands;
mod logging;
mod output;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "herdstat",
    version,
    about = "Herd, milk and breeding analytics for dairy farms"
)]
struct Cli {
    /// Log pipeline details to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute herd composition, milk and AI metrics for a dataset
    Analyze {
        /// Path to a farm dataset JSON file
        dataset: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Custom JSON profile file
        #[arg(long, value_name = "FILE", conflicts_with = "preset")]
        profile: Option<PathBuf>,

        /// Predefined profile (default: "default")
        #[arg(long, value_name = "NAME")]
        preset: Option<String>,
    },
    /// Build the paginated analytics report and write it to disk
    Report {
        /// Path to a farm dataset JSON file
        dataset: PathBuf,

        /// Artifact format: txt (default) or json
        #[arg(short, long, default_value = "txt")]
        format: String,

        /// Directory to write the report into
        #[arg(long, value_name = "DIR", default_value = ".")]
        out_dir: PathBuf,

        /// Report date as YYYY-MM-DD (default: today)
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,

        /// Custom JSON profile file
        #[arg(long, value_name = "FILE", conflicts_with = "preset")]
        profile: Option<PathBuf>,

        /// Predefined profile (default: "default")
        #[arg(long, value_name = "NAME")]
        preset: Option<String>,
    },
    /// Inspect and validate analytics profiles
    Profiles {
        #[command(subcommand)]
        action: ProfilesAction,
    },
}

#[derive(Subcommand)]
enum ProfilesAction {
    /// List predefined profiles
    List,
    /// Explain a profile's tier table and page layout
    Explain {
        /// Preset name (e.g., "default")
        preset: String,
    },
    /// Validate a custom profile file
    Validate {
        /// Path to JSON profile file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Analyze {
            dataset,
            output,
            profile,
            preset,
        } => commands::analyze::run(&dataset, &output, profile.as_deref(), preset.as_deref()),
        Commands::Report {
            dataset,
            format,
            out_dir,
            date,
            profile,
            preset,
        } => commands::report::run(
            &dataset,
            &format,
            &out_dir,
            date,
            profile.as_deref(),
            preset.as_deref(),
        ),
        Commands::Profiles { action } => match action {
            ProfilesAction::List => commands::profiles::list(),
            ProfilesAction::Explain { preset } => commands::profiles::explain(&preset),
            ProfilesAction::Validate { file } => commands::profiles::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
