#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for the collision dashboard.
//!
//! ```text
//! crash_dash [--data <csv>] serve
//! crash_dash [--data <csv>] options
//! crash_dash [--data <csv>] report [--borough B]... [--year Y]... [--injury I] [--search TEXT]
//! crash_dash [--data <csv>] interactive
//! ```
//!
//! Running with no subcommand shows a tool menu.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crash_dash_analytics::build_report;
use crash_dash_collision_models::InjuryChoice;
use crash_dash_dataset::Dataset;
use crash_dash_query::resolve_filters;
use crash_dash_query_models::FilterSelections;
use crash_dash_server::{ServerConfig, run_server};
use crash_dash_server_models::ApiOptions;
use dialoguer::{Input, Select};

#[derive(Parser)]
#[command(name = "crash_dash", about = "NYC collision dashboard toolchain")]
struct Cli {
    /// Collision CSV export (overrides `DATASET_PATH`)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Print the selectable filter options as JSON
    Options,
    /// Print one report as JSON
    Report {
        /// Borough to include (repeatable)
        #[arg(long = "borough")]
        boroughs: Vec<String>,
        /// Year to include (repeatable)
        #[arg(long = "year")]
        years: Vec<i32>,
        /// Vehicle type to include (repeatable)
        #[arg(long = "vehicle")]
        vehicle_types: Vec<String>,
        /// Contributing factor to include (repeatable)
        #[arg(long = "factor")]
        contributing_factors: Vec<String>,
        /// Injury type: any, pedestrian, cyclist or motorist
        #[arg(long, default_value = "any", value_parser = parse_injury)]
        injury: InjuryChoice,
        /// Free-text search, e.g. "brooklyn 2022 pedestrian"
        #[arg(long)]
        search: Option<String>,
    },
    /// Prompt for server settings, then start the server
    Interactive,
}

/// Entries of the no-subcommand menu.
enum Tool {
    Serve,
    Interactive,
    Options,
    Search,
}

impl Tool {
    const ALL: &[Self] = &[Self::Serve, Self::Interactive, Self::Options, Self::Search];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Serve => "Start server",
            Self::Interactive => "Configure and start server",
            Self::Options => "Show filter options",
            Self::Search => "Search collisions",
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let mut config = ServerConfig::from_env();
    if let Some(data) = cli.data {
        config.dataset_path = data;
    }

    let command = match cli.command {
        Some(command) => command,
        None => select_command()?,
    };

    match command {
        Commands::Serve => serve(config)?,
        Commands::Interactive => {
            actix_web::rt::System::new()
                .block_on(crash_dash_server::interactive::run(config))?;
        }
        Commands::Options => {
            let dataset = crash_dash_dataset::load(&config.dataset_path)?;
            let options = ApiOptions::from(dataset.lookups());
            println!("{}", serde_json::to_string_pretty(&options)?);
        }
        Commands::Report {
            boroughs,
            years,
            vehicle_types,
            contributing_factors,
            injury,
            search,
        } => {
            let dataset = crash_dash_dataset::load(&config.dataset_path)?;
            let selections = FilterSelections {
                boroughs,
                years,
                vehicle_types,
                contributing_factors,
                injury,
                search,
            };
            print_report(&dataset, &selections)?;
        }
    }

    Ok(())
}

fn parse_injury(value: &str) -> Result<InjuryChoice, String> {
    value
        .parse()
        .map_err(|_| format!("unknown injury type {value:?}"))
}

fn serve(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    actix_web::rt::System::new().block_on(run_server(config))?;
    Ok(())
}

fn print_report(
    dataset: &Dataset,
    selections: &FilterSelections,
) -> Result<(), Box<dyn std::error::Error>> {
    let filters = resolve_filters(selections, dataset.lookups());
    let report = build_report(dataset, &filters);
    log::info!("{}", report.status);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn select_command() -> Result<Commands, Box<dyn std::error::Error>> {
    println!("Collision Dashboard");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(match Tool::ALL[idx] {
        Tool::Serve => Commands::Serve,
        Tool::Interactive => Commands::Interactive,
        Tool::Options => Commands::Options,
        Tool::Search => {
            let search: String = Input::new()
                .with_prompt("Search")
                .allow_empty(true)
                .interact_text()?;
            Commands::Report {
                boroughs: Vec::new(),
                years: Vec::new(),
                vehicle_types: Vec::new(),
                contributing_factors: Vec::new(),
                injury: InjuryChoice::Any,
                search: Some(search),
            }
        }
    })
}
