//! Output module: poem files and the end-of-run summary
//!
//! This module handles:
//! - Turning poem titles and poet names into safe file and directory names
//! - Writing poem bodies to disk
//! - Printing run statistics

mod filename;
pub mod stats;
mod writer;

pub use filename::{poem_filename, sanitize_filename, POEM_EXTENSION};
pub use stats::print_statistics;
pub use writer::{ensure_dir, poet_dir, poet_target_dir, write_poem};
