pub mod selection;
pub mod stats;

pub use selection::AdaptiveSelector;
pub use stats::OperatorStats;
