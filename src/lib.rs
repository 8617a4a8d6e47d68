//! # infotree
//!
//! Discover the replication topology of a set of key-value store instances
//! and show any `INFO` section from every node as an indented tree:
//! - Seeds (`host port` lines) are resolved and each node's
//!   `INFO replication` is followed to its replicas, to any depth
//! - A category query fetches that section from every node and keeps the
//!   lines matching the requested key prefixes
//! - Output nests each replica under its master with `├──` branches
//!
//! ## Architecture

#![allow(async_fn_in_trait)]
//!
//! ```text
//!  seeds ──► TopologyBuilder ──► Vec<Node> ──► Walker ──► WalkReport ──► stdout
//!                 │                               │
//!                 └──── InfoFetcher (RESP) ◄──────┘
//!                            + LineFilter
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # One-shot query, seeds on stdin
//! echo "db1 6379" | infotree -a s3cret memory used_memory
//!
//! # Interactive shell over a seed file
//! infotree --seeds ./seeds.txt
//! > replication master_link_status
//! > stats
//! > quit
//! ```

pub mod common;
pub mod info;
pub mod ops;
pub mod topology;

// Re-export commonly used types
pub use common::{Config, Error, FailurePolicy, Result};
pub use info::{Category, InfoFetcher, LineFilter, RespInfoFetcher};
pub use ops::{Session, WalkReport, Walker};
pub use topology::{Node, Resolver, Seed, SystemResolver, TopologyBuilder};

/// Current version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
