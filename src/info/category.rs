//! INFO sections an operator can ask for

use std::fmt;
use std::str::FromStr;

use crate::common::Error;

/// One named section of a node's `INFO` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Memory,
    Replication,
    Server,
    Clients,
    Stats,
    Persistence,
    Cpu,
    Cluster,
    Keyspace,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Memory,
        Category::Replication,
        Category::Server,
        Category::Clients,
        Category::Stats,
        Category::Persistence,
        Category::Cpu,
        Category::Cluster,
        Category::Keyspace,
    ];

    /// Section name as sent on the wire (`INFO <name>`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Memory => "memory",
            Category::Replication => "replication",
            Category::Server => "server",
            Category::Clients => "clients",
            Category::Stats => "stats",
            Category::Persistence => "persistence",
            Category::Cpu => "cpu",
            Category::Cluster => "cluster",
            Category::Keyspace => "keyspace",
        }
    }

    /// Whether a query with no key prefixes shows every line.
    ///
    /// Replication output is long and mostly per-replica detail, so it only
    /// shows the keys that were asked for.
    pub fn shows_all_by_default(&self) -> bool {
        !matches!(self, Category::Replication)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}
