/// Polling lifecycle manager for generation jobs.
pub mod tracker;
