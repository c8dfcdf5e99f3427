//! Output Generation
//!
//! End-of-run reports.

pub mod report;

pub use report::*;
