// Output formatting module

pub mod perfdata;
pub mod report;

// Re-export commonly used items for cleaner imports
pub use perfdata::PerfData;
pub use report::Outcome;
