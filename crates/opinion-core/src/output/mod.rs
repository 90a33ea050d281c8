//! Output
//!
//! Run reports for downstream plotting and analysis.

pub mod report;

pub use report::*;
