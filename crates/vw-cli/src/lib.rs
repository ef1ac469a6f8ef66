//! `vw` command line inspector
//!
//! Runs the reader core against JSON files: render plans for a stanza under a
//! catalog, merged settings blobs, and search requests built field by field
//! through the query builder.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod block_arg;
pub mod cli;
pub mod commands;
pub mod logging;

pub use block_arg::{BlockArg, BlockArgError};
pub use logging::{init_logging, LogConfig, LogFormat};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
