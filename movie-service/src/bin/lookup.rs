use anyhow::Context;
use clap::Parser;
use movie_aggregator::{Config, MovieAggregator};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Look up one movie and print the merged record as JSON.
#[derive(Parser, Debug)]
#[command(name = "movie-lookup", version, about)]
struct Args {
    /// Movie title to look up
    title: String,

    /// Preferred release-year prefix for choosing among search candidates
    #[arg(long)]
    year_prefix: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays valid JSON.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = Config::from_env().context("Failed to load provider configuration")?;
    if let Some(prefix) = args.year_prefix {
        config.release_year_prefix = prefix;
    }

    let aggregator = MovieAggregator::from_config(&config)?;
    info!("Looking up '{}'", args.title);

    let record = aggregator
        .fetch(&args.title)
        .await
        .with_context(|| format!("Lookup for '{}' failed", args.title))?;

    let output = if args.pretty {
        serde_json::to_string_pretty(&record)?
    } else {
        serde_json::to_string(&record)?
    };
    println!("{}", output);

    Ok(())
}
