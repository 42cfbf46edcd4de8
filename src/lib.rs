pub mod cli;
pub mod config;
pub mod core;
pub mod input;
pub mod logging;
pub mod utils;

pub use crate::config::ZoneDiffConfig;
pub use crate::core::{DiffOptions, DiffStats, Edit, LineSource, MergeDiff, Polarity, Record};
pub use crate::input::{open_zone_file, Compression};
