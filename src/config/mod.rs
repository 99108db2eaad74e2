pub mod options;

pub use options::{DegenerateModePolicy, PodOptions, RomOptions};
