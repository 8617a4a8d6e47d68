//! Snapshot of one store instance and the replicas it reported

use std::net::IpAddr;

use crate::topology::ReplicaDescriptor;

/// State tag given to operator-supplied seeds.
pub const SEED_STATE: &str = "online";

/// One store instance in a discovered topology.
///
/// Nodes are built bottom-up by the topology builder and never change
/// afterwards; `children` keeps the order the parent reported them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    address: String,
    port: u16,
    label: String,
    children: Vec<Node>,
}

impl Node {
    /// A top-level node. The label keeps the hostname as typed while
    /// queries go to the resolved `address`.
    pub fn seed(host: &str, address: IpAddr, port: u16, children: Vec<Node>) -> Self {
        Self {
            address: address.to_string(),
            port,
            label: format!("{}:{}:{}", host, port, SEED_STATE),
            children,
        }
    }

    /// A node discovered through its parent's replication report.
    pub fn replica(replica: &ReplicaDescriptor, children: Vec<Node>) -> Self {
        Self {
            address: replica.ip.clone(),
            port: replica.port,
            label: format!("{}:{}:{}", replica.ip, replica.port, replica.state),
            children,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Levels in this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Node::depth).max().unwrap_or(0)
    }

    /// Nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }
}
