//! Scrobble Analytics - Main entry point
//!
//! Loads an exported listening history once and answers one query about it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use scrobble_analytics::config::DisplayConfig;
use scrobble_analytics::date_range::parse_month_day_year;
use scrobble_analytics::display::{self, print_section_simple};
use scrobble_analytics::{Catalog, Config, Dimension, ListeningEvent, QueryError};

/// Month, day, year as typed on the command line.
type Mdy = (u32, u32, i32);

#[derive(Parser)]
#[command(name = "scrobble-analytics")]
#[command(author, version, about = "Personal music listening analytics over exported scrobble history")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Listening history to read (overrides the configured file)
    #[arg(short, long, global = true, env = "SCROBBLE_HISTORY")]
    file: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List every listen on a date (M/D/YYYY)
    OnDate {
        #[arg(value_parser = parse_month_day_year)]
        date: Mdy,
    },

    /// How many times a song, artist, or album was listened to
    Count {
        dimension: Dimension,

        /// Exact name, case-sensitive
        name: String,

        /// Only count listens on this date (M/D/YYYY)
        #[arg(long, value_parser = parse_month_day_year)]
        date: Option<Mdy>,
    },

    /// Most listened song, artist, or album
    Top {
        dimension: Dimension,

        /// Only consider listens on this date (M/D/YYYY)
        #[arg(long, value_parser = parse_month_day_year)]
        date: Option<Mdy>,

        /// Rank the N most listened instead of only the leaders
        #[arg(short = 'n', long, conflicts_with = "date")]
        limit: Option<usize>,
    },

    /// Longest run of back-to-back listens
    Streak { dimension: Dimension },

    /// Date(s) a song, artist, or album was listened to the most
    PeakDay {
        dimension: Dimension,

        /// Exact name, case-sensitive
        name: String,
    },

    /// Date(s) with the most listens overall
    BusiestDay,

    /// Totals and averages for the whole history
    Summary,

    /// List the whole history
    List {
        #[arg(value_enum)]
        order: ListOrder,
    },

    /// Show or edit configuration
    Config {
        /// Print current configuration
        #[arg(long)]
        show: bool,

        /// Create default configuration file
        #[arg(long)]
        init: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ListOrder {
    /// Every listen, oldest first
    Chrono,
    Song,
    Artist,
    Album,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load and validate configuration
    let config = if let Some(ref path) = cli.config {
        Config::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?
    } else {
        Config::load()?
    };
    config.validate()?;

    // Initialize logging; RUST_LOG wins over the configured level
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let command = cli.command.unwrap_or(Commands::Summary);

    if let Commands::Config { show, init } = command {
        return run_config(&config, show, init);
    }

    let path = config.history_path(cli.file.as_deref())?;
    let catalog = load_catalog(&path)?;

    match run_query(&catalog, command, &config.display, cli.json) {
        Err(err) => match err.downcast_ref::<QueryError>() {
            // A bad query is the user's answer, not a failure
            Some(query_err) => {
                println!("{query_err}");
                Ok(())
            }
            None => Err(err),
        },
        ok => ok,
    }
}

fn run_config(config: &Config, show: bool, init: bool) -> Result<()> {
    if init {
        let default_config = Config::default();
        default_config.save()?;
        println!(
            "Created default configuration at {}",
            Config::config_path()?.display()
        );
    } else if show {
        let contents = toml::to_string_pretty(config)?;
        println!("{contents}");
    } else {
        println!("Configuration path: {}", Config::config_path()?.display());
    }
    Ok(())
}

fn load_catalog(path: &Path) -> Result<Catalog> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read listening history from {}", path.display()))?;
    let catalog = text
        .parse::<Catalog>()
        .with_context(|| format!("Failed to load {}", path.display()))?;
    Ok(catalog)
}

/// Print `value` as JSON, or the text produced by `text`.
fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}

fn run_query(catalog: &Catalog, command: Commands, opts: &DisplayConfig, json: bool) -> Result<()> {
    match command {
        Commands::OnDate {
            date: (month, day, year),
        } => {
            let events = catalog.listens_on_date(month, day, year)?;
            emit(json, &events, || display::render_listens(&events, opts))
        }

        Commands::Count {
            dimension,
            name,
            date,
        } => {
            let count = match date {
                Some((month, day, year)) => {
                    catalog.count_on_date(&name, dimension, month, day, year)?
                }
                None => catalog.count_for(&name, dimension)?,
            };
            let value = json!({ "name": &name, "dimension": dimension, "count": count });
            emit(json, &value, || {
                format!(
                    "{} was listened to {} {}",
                    name,
                    display::format_count(count, opts.thousands_separator),
                    display::times(count)
                )
            })
        }

        Commands::Top {
            dimension,
            limit: Some(n),
            ..
        } => {
            let top = catalog.top(dimension, n);
            let rows: Vec<_> = top
                .iter()
                .map(|(name, count)| json!({ "name": name, "count": count }))
                .collect();
            emit(json, &rows, || {
                format!(
                    "Top {dimension} by listens:\n{}",
                    display::render_top(&top, opts)
                )
            })
        }

        Commands::Top {
            dimension,
            date,
            limit: None,
        } => {
            let ranking = match date {
                Some((month, day, year)) => {
                    catalog.most_frequent_on_date(dimension, month, day, year)?
                }
                None => catalog.most_frequent(dimension),
            };
            emit(json, &ranking, || {
                format!(
                    "Most listened {dimension}: {}",
                    display::render_ranking(&ranking, opts)
                )
            })
        }

        Commands::Streak { dimension } => {
            let ranking = catalog.longest_consecutive(dimension);
            emit(json, &ranking, || {
                format!(
                    "Longest {dimension} streak: {}",
                    display::render_ranking(&ranking, opts)
                )
            })
        }

        Commands::PeakDay { dimension, name } => {
            let ranking = catalog.peak_days_for(&name, dimension)?;
            emit(json, &ranking, || {
                format!(
                    "{name} peaked on {}",
                    display::render_date_ranking(&ranking, opts)
                )
            })
        }

        Commands::BusiestDay => {
            let ranking = catalog.busiest_days();
            emit(json, &ranking, || {
                format!("Busiest day: {}", display::render_date_ranking(&ranking, opts))
            })
        }

        Commands::Summary => {
            let value = json!({
                "total_listens": catalog.total_listens(),
                "distinct_days": catalog.total_distinct_days(),
                "average_per_day": catalog.average_listens_per_day(),
                "distinct_songs": catalog.distinct_count(Dimension::Song),
                "distinct_artists": catalog.distinct_count(Dimension::Artist),
                "distinct_albums": catalog.distinct_count(Dimension::Album),
                "range": catalog.date_range(),
            });
            if json {
                return emit(true, &value, String::new);
            }
            print_section_simple("Listening Summary");
            println!("{}", display::render_summary(catalog, opts));
            for &dimension in Dimension::all() {
                print_section_simple(&format!("Top {dimension}"));
                println!("  {}", display::render_ranking(&catalog.most_frequent(dimension), opts));
            }
            Ok(())
        }

        Commands::List { order } => {
            let dimension = match order {
                ListOrder::Chrono => {
                    let events: Vec<&ListeningEvent> = catalog.chronological().collect();
                    return emit(json, &events, || display::render_chronological(catalog, opts));
                }
                ListOrder::Song => Dimension::Song,
                ListOrder::Artist => Dimension::Artist,
                ListOrder::Album => Dimension::Album,
            };
            let rows: Vec<_> = catalog
                .alphabetical(dimension)
                .map(|bucket| {
                    json!({
                        "name": bucket.name(),
                        "count": bucket.count(),
                        "artist": bucket.first_artist(),
                    })
                })
                .collect();
            emit(json, &rows, || {
                display::render_alphabetical(catalog, dimension, opts)
            })
        }

        // Handled before the history is loaded
        Commands::Config { .. } => Ok(()),
    }
}
