pub mod board;
mod engine;
mod solver;
mod types;

pub use engine::run_analysis;
pub use solver::{irr, npv};
pub use types::{
    AnalysisReport, AnalysisSummary, DevelopmentLogEntry, MetricStats, PlayerConfig,
    PurchasePolicy, SimulationConfig, TrialOutcome,
};
