pub mod ai;
pub mod calculators;
pub mod runner;
pub mod state;
pub mod stats;
pub mod turn_orchestrator;

#[cfg(test)]
pub(crate) mod tests;
