mod build;
mod check;
mod source;
mod terminal;
mod view;

use std::path::PathBuf;

use attractions_core::AppConfig;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "attractions")]
#[command(about = "Build and inspect the attractions map site")]
struct Cli {
    /// Published CSV feed URL (overrides ATTRACTIONS_FEED_URL)
    #[arg(long, global = true)]
    feed_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the feed and write the static site
    Build {
        /// Site input directory (defaults to ATTRACTIONS_SITE_DIR)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Output directory (defaults to site.yaml `output`, then ATTRACTIONS_OUTPUT_DIR)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Fetch and normalize the feed, reporting every skipped row
    Check,
    /// Print the attractions passing the category and state filters
    List {
        #[arg(long, default_value = "all")]
        category: String,
        #[arg(long, default_value = "all")]
        state: String,
    },
    /// Focus the map on coordinates and report which popup would open
    Locate {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
    },
}

impl Cli {
    /// Moves command-line overrides into `config`.
    fn apply_overrides(&mut self, config: &mut AppConfig) {
        if let Some(url) = self.feed_url.take() {
            config.feed_url = Some(url);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parsed before the environment is read.
    let mut cli = Cli::parse();

    dotenvy::dotenv().ok();
    let mut config = attractions_core::load_app_config()?;
    cli.apply_overrides(&mut config);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Build { input, output }) => {
            build::run_build(&config, input, output).await?;
        }
        Some(Commands::Check) => check::run_check(&config).await?,
        Some(Commands::List { category, state }) => {
            view::run_list(&config, &category, &state).await?;
        }
        Some(Commands::Locate { lat, lng }) => view::run_locate(&config, lat, lng).await?,
        None => Cli::command().print_help()?,
    }

    Ok(())
}
