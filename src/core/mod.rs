pub mod edit;
pub mod engine;
pub mod record;
pub mod source;

pub use edit::Edit;
pub use engine::{DiffError, DiffOptions, DiffStats, MergeDiff, Polarity, Side, SideStats};
pub use record::{InvalidRecord, Record};
pub use source::{LineSource, ReaderLineSource};
