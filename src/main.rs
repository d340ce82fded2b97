use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use truckmap::client::{self, HttpTruckFeed};
use truckmap::config::Config;
use truckmap::dataset::DatasetClient;
use truckmap::dataset_cache::DatasetCache;
use truckmap::geo::Bounds;
use truckmap::query::TruckQuery;
use truckmap::server::{self, AppState};
use truckmap::template_engine::TemplateEngine;

#[derive(Parser)]
#[command(name = "truckmap", about = "Food truck map service")]
struct Cli {
    /// Config file; defaults to truckmap.toml, then truckmap.example.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service (default).
    Serve,
    /// Query a running service and print the matching trucks.
    Trucks {
        #[arg(long, default_value = "http://127.0.0.1:5000")]
        server: String,
        /// swLat,swLng,neLat,neLng
        #[arg(long)]
        bounds: Option<Bounds>,
        #[arg(long, value_delimiter = ',')]
        food: Vec<String>,
        #[arg(long)]
        name: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let config = match &cli.config {
                Some(path) => Config::load_from(path)?,
                None => Config::load()?,
            };
            let thread_count = config.thread_count.unwrap_or_else(num_cpus::get);
            info!("starting server with {} threads", thread_count);

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(thread_count)
                .enable_all()
                .build()?;
            runtime.block_on(async_main(config))
        }
        Command::Trucks { server, bounds, food, name } => {
            let query = TruckQuery { bounds, name, ..Default::default() }.with_food(food);
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(print_trucks(server, query))
        }
    }
}

async fn async_main(config: Config) -> anyhow::Result<()> {
    let template_engine = TemplateEngine::new(config.template_dir())?;
    let http_client = reqwest::Client::builder()
        .user_agent(concat!("truckmap/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let cache = if config.cache_ttl_secs() > 0 {
        Some(DatasetCache::new(config.cache_dir(), config.cache_ttl_secs(), config.cache_size_mb()).await?)
    } else {
        None
    };
    let datasets = DatasetClient::new(http_client, config.dataset_url.clone(), cache);

    let state = Arc::new(AppState {
        template_engine,
        config,
        datasets,
    });
    server::serve(state).await
}

async fn print_trucks(server: String, query: TruckQuery) -> anyhow::Result<()> {
    let feed = HttpTruckFeed::new(reqwest::Client::new(), server);
    let count = client::print_trucks(&feed, &query, &mut std::io::stdout().lock()).await?;
    info!("{} trucks", count);
    Ok(())
}
