//! Command handlers, kept out of main.rs for testability

pub mod merge;

pub use merge::{execute_merge, render_stats, MergeRequest, USAGE};
