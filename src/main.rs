mod commands;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use menu_flyers::config;
use menu_flyers::school::{Meal, SchoolLevel};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "menu-flyers", version, about = "Cafeteria line-menu flyers from Nutrislice")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch menus, render a flyer per school and day, and zip them
    Generate {
        /// First day to cover, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Number of school days to cover
        #[arg(long, default_value_t = config::DEFAULT_DAYS)]
        days: usize,
        /// lunch or breakfast
        #[arg(long, default_value = "lunch")]
        meal: Meal,
        /// Only schools of this level (elementary, middle, high)
        #[arg(long)]
        level: Option<SchoolLevel>,
        /// Schools CSV, URL or path (default: $MENU_FLYERS_SCHOOLS or the assets base)
        #[arg(long)]
        schools: Option<String>,
        /// Extra text to leave off the flyers; repeatable
        #[arg(long = "exclude")]
        exclude: Vec<String>,
        /// Render without the district and vendor logos
        #[arg(long)]
        no_logos: bool,
        /// Archive path (default: menus_<meal>_<date>.zip)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print the station grouping for a week
    Preview {
        /// School slug to fetch from Nutrislice
        #[arg(long, required_unless_present = "file")]
        school: Option<String>,
        /// Level of the school, picks the station blocklist
        #[arg(long, default_value = "high")]
        level: SchoolLevel,
        /// Read a saved weeks JSON instead of fetching
        #[arg(long, conflicts_with = "school")]
        file: Option<PathBuf>,
        /// Any day in the week to show (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// lunch or breakfast
        #[arg(long, default_value = "lunch")]
        meal: Meal,
    },
    /// List the schools in the CSV
    Schools {
        #[arg(long)]
        level: Option<SchoolLevel>,
        /// Schools CSV, URL or path
        #[arg(long)]
        schools: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Generate { date, days, meal, level, schools, exclude, no_logos, out } => {
            commands::generate::run(&commands::generate::Options {
                start: date.unwrap_or_else(today),
                days,
                meal,
                level,
                schools,
                exclude,
                logos: !no_logos,
                out,
            })
        }
        Command::Preview { school, level, file, date, meal } => commands::preview::run(
            school.as_deref(),
            level,
            file.as_deref(),
            date.unwrap_or_else(today),
            meal,
        ),
        Command::Schools { level, schools } => commands::schools::run(level, schools.as_deref()),
    }
}
