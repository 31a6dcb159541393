use std::time::Duration;

use crate::classify::Classifier;
use crate::db::ItemStore;
use crate::error::CycleError;
use crate::feed::TimelineSource;

use super::cycle::run_cycle;
use super::CycleReport;

/// Owns the feed, the store and the classifier, and drives cycles over them.
pub struct Ingestor<F, S> {
    source: F,
    store: S,
    classifier: Classifier,
    interval: Duration,
}

impl<F, S> Ingestor<F, S>
where
    F: TimelineSource,
    S: ItemStore,
{
    pub fn new(source: F, store: S, classifier: Classifier, interval: Duration) -> Self {
        Self {
            source,
            store,
            classifier,
            interval,
        }
    }

    pub async fn run_once(&self) -> Result<CycleReport, CycleError> {
        run_cycle(&self.source, &self.store, &self.classifier).await
    }

    /// Run cycles back to back, sleeping `interval` after each, until the
    /// process is killed. Cycle failures are logged and otherwise ignored.
    pub async fn run(&self) {
        tracing::info!("Ingestion loop started, polling every {:?}", self.interval);

        loop {
            match self.run_once().await {
                Ok(report) if report.persisted > 0 => {
                    tracing::info!(
                        cursor = report.cursor,
                        fetched = report.fetched,
                        persisted = report.persisted,
                        "Stored new items"
                    );
                }
                Ok(report) => {
                    tracing::debug!("No new items after cursor {}", report.cursor);
                }
                Err(e) => {
                    tracing::error!("Ingestion cycle failed: {}", e);
                }
            }

            tokio::time::sleep(self.interval).await;
        }
    }
}
