mod cycle;
mod runner;

pub use cycle::CycleReport;
pub use runner::Ingestor;
