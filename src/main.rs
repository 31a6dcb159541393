use std::time::Duration;

mod classify;
mod config;
mod db;
mod error;
mod feed;
mod ingest;
mod models;

use classify::{AliasTable, Classifier};
use config::Config;
use db::Repository;
use error::Result;
use feed::TimelineFetcher;
use ingest::Ingestor;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (info and above unless RUST_LOG says otherwise)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let flag = args.get(1).map(String::as_str);

    // Load configuration
    let config = Config::load()?;

    let repository = Repository::new(&config.db_path).await?;

    // --list dumps the stored items for downstream readers and exits
    if flag == Some("--list") {
        for item in repository.get_all_items().await? {
            println!("{}", serde_json::to_string(&item)?);
        }
        return Ok(());
    }

    let aliases = match &config.aliases {
        Some(table) => AliasTable::new(table)?,
        None => AliasTable::builtin()?,
    };
    tracing::info!("Loaded {} aliases", aliases.len());

    let classifier = Classifier::new(aliases)?;
    let fetcher = TimelineFetcher::new(&config)?;
    let ingestor = Ingestor::new(
        fetcher,
        repository,
        classifier,
        Duration::from_secs(config.poll_interval_secs),
    );

    // --once runs a single cycle and exits
    if flag == Some("--once") {
        let report = ingestor.run_once().await.map_err(|e| anyhow::anyhow!(e))?;
        println!(
            "Cursor {}: fetched {}, stored {}",
            report.cursor, report.fetched, report.persisted
        );
        return Ok(());
    }

    tracing::info!(
        "Polling @{} into {}",
        config.screen_name,
        config.db_path
    );
    ingestor.run().await;

    Ok(())
}
