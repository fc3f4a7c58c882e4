mod fetch;

use clap::{Parser, Subcommand};
use moto_core::{AppConfig, ConfigError, CountryCode};
use tracing_subscriber::EnvFilter;

use crate::fetch::{FetchArgs, Target};

#[derive(Debug, Parser)]
#[command(name = "moto-cli")]
#[command(about = "Collects EU motorcycle repair shops from OpenStreetMap into the directory store")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Query every country (or a subset) and upsert the shops found
    Fetch {
        /// Restrict the run to these countries; repeat to pass several
        #[arg(long = "country", value_name = "CC")]
        countries: Vec<CountryCode>,
        /// Where normalized shops are written
        #[arg(long, value_enum, default_value_t = Target::Rest)]
        target: Target,
        /// Output path for `--target csv`
        #[arg(long, default_value = fetch::DEFAULT_CSV_PATH)]
        csv_path: std::path::PathBuf,
        /// Query and normalize, but write nothing
        #[arg(long)]
        dry_run: bool,
    },
    /// Apply database migrations (postgres target)
    Migrate,
    /// Print the Overpass query sent for a country
    Query {
        #[arg(long, value_name = "CC")]
        country: CountryCode,
    },
    /// List the EU country codes in processing order
    Countries,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Query { country } => {
            print!("{}", moto_overpass::build_query(&country));
        }
        Commands::Countries => {
            for country in CountryCode::all() {
                println!("{country}");
            }
        }
        Commands::Fetch {
            countries,
            target,
            csv_path,
            dry_run,
        } => {
            let config = load_config_and_init_tracing()?;
            let args = FetchArgs {
                countries,
                target,
                csv_path,
                dry_run,
            };
            let summary = fetch::run_fetch(&config, &args).await?;
            println!();
            print!("{}", summary.render());
        }
        Commands::Migrate => {
            let config = load_config_and_init_tracing()?;
            let database_url = config.require_database_url().map_err(config_failure)?;
            let pool =
                moto_store::connect_pool(database_url, moto_store::PoolConfig::default()).await?;
            moto_store::run_migrations(&pool).await?;
            println!("migrations applied");
        }
    }

    Ok(())
}

/// Loads `.env.local`/`.env` and the process environment, then installs the
/// global subscriber. `RUST_LOG` takes precedence over `MOTO_LOG_LEVEL`.
fn load_config_and_init_tracing() -> anyhow::Result<AppConfig> {
    let config = moto_core::load_app_config().map_err(config_failure)?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(config)
}

/// Prints remediation steps for a configuration error and converts it for
/// the `anyhow` exit path.
pub(crate) fn config_failure(err: ConfigError) -> anyhow::Error {
    eprintln!("Configuration error: {err}\n{}", err.remediation());
    anyhow::Error::new(err)
}
