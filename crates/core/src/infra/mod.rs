pub mod generator;
pub mod metrics;
pub mod prompts;
