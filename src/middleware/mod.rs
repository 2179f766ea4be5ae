//! Middleware applied around every request
//!
//! - access logging
//! - panic recovery

mod access_log;
mod recovery;

pub use access_log::AccessLog;
pub use recovery::recover;
