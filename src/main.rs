use clap::{Args as ClapArgs, Parser, Subcommand};
use std::fs::File;
use std::io;
use std::io::Read;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use prodlint::catalog::{self, Catalog, Outcome};
use prodlint::config::{ValidatorConfig, DEFAULT_SCHEMA_PATH, FIRST_PRODUCT_RELEASE};
use prodlint::product::display;
use prodlint::product::validation::ProductValidator;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Debug, ClapArgs)]
struct ValidationArgs {
    /// JSON Schema the records must conform to.
    #[clap(long, value_parser, default_value = DEFAULT_SCHEMA_PATH)]
    schema: PathBuf,

    /// Seconds to wait for each network request.
    #[clap(long, value_parser, default_value_t = 10)]
    timeout: u64,

    /// Print why each check failed next to its reason.
    #[clap(long)]
    details: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate a single record read from a file or stdin.
    Lint {
        #[clap(short, long, value_parser)]
        file: Option<PathBuf>,

        #[clap(flatten)]
        validation: ValidationArgs,
    },
    /// Validate every record of a directory into a deduplicated catalog.
    Catalog {
        #[clap(short, long, value_parser, default_value = "jsons")]
        dir: PathBuf,

        /// Exit with status 1 when a record is rejected or unreadable.
        #[clap(long)]
        strict: bool,

        #[clap(flatten)]
        validation: ValidationArgs,
    },
}

impl ValidationArgs {
    fn config(&self) -> ValidatorConfig {
        ValidatorConfig {
            schema_path: self.schema.clone(),
            timeout: Duration::from_secs(self.timeout),
            release_floor: FIRST_PRODUCT_RELEASE,
        }
    }
}

fn get_input(file: Option<PathBuf>) -> io::Result<String> {
    let mut payload = String::new();
    match file {
        Some(file_path) => {
            File::open(file_path)?.read_to_string(&mut payload)?;
        }
        None => {
            io::stdin().read_to_string(&mut payload)?;
        }
    }
    Ok(payload)
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", display::error_header("Error"), message);
    process::exit(2);
}

fn main() {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match args.command {
        Commands::Lint { file, validation } => {
            let input = get_input(file).unwrap_or_else(|error| fail(error));

            let record: serde_json::Value = serde_json::from_str(&input)
                .unwrap_or_else(|error| fail(format!("Parse error - {}", error)));

            let report = prodlint::validate(&record, &validation.config())
                .unwrap_or_else(|error| fail(error));

            println!("{}", display::report_line(&report, validation.details));

            let exit_code = match report.is_success() {
                true => 0,
                false => 1,
            };
            process::exit(exit_code);
        }

        Commands::Catalog {
            dir,
            strict,
            validation,
        } => {
            let validator = ProductValidator::from_config(&validation.config())
                .unwrap_or_else(|error| fail(error));
            let mut catalog = Catalog::new();

            let outcomes = catalog::run(&dir, &validator, &mut catalog)
                .unwrap_or_else(|error| fail(error));

            outcomes
                .iter()
                .for_each(|outcome| display::print_outcome(outcome, validation.details));

            println!(
                "{}  {} of {} records accepted",
                display::success_header("Catalog"),
                catalog.len(),
                outcomes.len()
            );

            let has_failures = outcomes.iter().any(|file_outcome| {
                matches!(
                    file_outcome.outcome,
                    Outcome::Rejected(_) | Outcome::Unreadable(_)
                )
            });

            if strict && has_failures {
                process::exit(1);
            }
        }
    }
}
