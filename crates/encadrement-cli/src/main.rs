use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use encadrement_core::{Field, FilterQuery, VerifyQuery, parse_furnishing};
use encadrement_store::{LoadOptions, RentControl};

mod display;

#[derive(Parser)]
#[command(
    name = "encadrement",
    version,
    about = "Look up Paris regulated rent bands and check a rent against them"
)]
struct Cli {
    /// Regulation dataset (.json, or .parquet when built with the parquet feature).
    #[arg(long, env = "ENCADREMENT_DATA")]
    data: PathBuf,

    /// Load datasets with duplicate keys or unordered bands, logging a warning
    /// for each finding instead of refusing to start.
    #[arg(
        long,
        env = "ENCADREMENT_LENIENT",
        action = clap::ArgAction::SetTrue,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    lenient: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the distinct values of an attribute (year, district, furnished, rooms, era).
    Values { field: Field },

    /// List the regulation bands matching the given attributes.
    Search {
        #[command(flatten)]
        filter: FilterArgs,

        /// Maximum number of rows to print.
        #[arg(long, default_value_t = 50)]
        limit: usize,

        /// Print every matching record as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Check a monthly rent against the band for a unit.
    Verify {
        #[command(flatten)]
        filter: FilterArgs,

        /// Living area in m².
        #[arg(long)]
        surface: f64,

        /// Monthly rent excluding charges, in €.
        #[arg(long)]
        rent: f64,

        /// Print the verdict as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct FilterArgs {
    /// Regulation year. `verify` defaults to the latest year in the dataset.
    #[arg(long)]
    year: Option<u16>,

    /// District (quartier) name, exactly as in the dataset.
    #[arg(long)]
    district: Option<String>,

    /// Furnishing: "meublé", "non meublé", or true/false.
    #[arg(long, value_parser = parse_furnished_arg)]
    furnished: Option<bool>,

    /// Number of main rooms.
    #[arg(long)]
    rooms: Option<u8>,

    /// Construction era, exactly as in the dataset (e.g. "1946-1970").
    #[arg(long)]
    era: Option<String>,
}

impl FilterArgs {
    fn into_query(self) -> FilterQuery {
        FilterQuery {
            year: self.year,
            district: self.district,
            furnished: self.furnished,
            room_count: self.rooms,
            era: self.era,
        }
    }
}

fn parse_furnished_arg(value: &str) -> Result<bool, String> {
    parse_furnishing(value)
        .ok_or_else(|| format!("expected \"meublé\", \"non meublé\", true or false, got {value:?}"))
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    tracing::info!("encadrement v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let options = if cli.lenient {
        LoadOptions::lenient()
    } else {
        LoadOptions::default()
    };
    let rc = RentControl::open(&cli.data, &options)
        .with_context(|| format!("loading regulation dataset {}", cli.data.display()))?;

    match cli.command {
        Command::Values { field } => {
            display::print_values(field, &rc.unique_values(field));
            Ok(ExitCode::SUCCESS)
        }
        Command::Search {
            filter,
            limit,
            json,
        } => {
            let records = rc.search(&filter.into_query());
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                display::print_records(&records, limit);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify {
            filter,
            surface,
            rent,
            json,
        } => {
            let mut query = filter.into_query();
            if query.year.is_none() {
                query.year = rc.latest_year();
            }

            let verdict = match VerifyQuery::from_filter(&query, surface, rent)
                .and_then(|q| rc.verify(&q))
            {
                Ok(verdict) => verdict,
                Err(e) => {
                    eprintln!("error: {e}");
                    return Ok(ExitCode::from(2));
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&verdict)?);
            } else {
                display::print_verdict(&verdict);
            }
            Ok(if verdict.is_not_found() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
    }
}
