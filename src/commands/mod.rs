// Command handlers module
pub mod check;

// Re-exports for cleaner imports
pub use check::execute as check;
