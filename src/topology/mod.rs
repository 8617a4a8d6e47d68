//! Replication topology discovery
//!
//! - [`seeds`] parses the operator's `host port` list.
//! - [`resolver`] maps seed hostnames to addresses.
//! - [`replica`] extracts replica descriptors from `INFO replication`.
//! - [`builder`] walks replica links recursively into a forest of [`Node`]s.

pub mod builder;
pub mod node;
pub mod replica;
pub mod resolver;
pub mod seeds;

pub use builder::TopologyBuilder;
pub use node::Node;
pub use replica::{parse_replica_line, parse_replicas, ReplicaDescriptor};
pub use resolver::{Resolver, SystemResolver};
pub use seeds::{parse_seeds, read_seeds, Seed};
