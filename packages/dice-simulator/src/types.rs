//! Shared types for the simulator.

use clap::ValueEnum;

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Jsonl,
    None,
}
