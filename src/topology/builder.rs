//! Recursive replication discovery
//!
//! Every seed is resolved up front, then each node's `INFO replication` is
//! read and every listed replica is queried in turn until nodes report no
//! replicas. Siblings are discovered concurrently but children always keep
//! the order their master listed them in.

use futures_util::future::{try_join_all, FutureExt, LocalBoxFuture};
use tracing::{debug, info, warn};

use crate::common::{Error, FailurePolicy, Result};
use crate::info::{Category, InfoFetcher};
use crate::topology::{parse_replicas, Node, Resolver, Seed};

/// Builds a forest of [`Node`] trees from a seed list.
pub struct TopologyBuilder<'a, F, R> {
    fetcher: &'a F,
    resolver: &'a R,
    policy: FailurePolicy,
}

impl<'a, F, R> TopologyBuilder<'a, F, R>
where
    F: InfoFetcher,
    R: Resolver,
{
    pub fn new(fetcher: &'a F, resolver: &'a R) -> Self {
        Self {
            fetcher,
            resolver,
            policy: FailurePolicy::Abort,
        }
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Discover the topology under every seed, in seed order.
    ///
    /// Resolution failures are always fatal. A node whose replication
    /// section cannot be read fails the build under [`FailurePolicy::Abort`]
    /// and becomes a leaf under [`FailurePolicy::Inline`].
    pub async fn build(&self, seeds: &[Seed]) -> Result<Vec<Node>> {
        let mut resolved = Vec::with_capacity(seeds.len());
        for seed in seeds {
            let address = self.resolver.resolve(&seed.host).await?;
            debug!(host = %seed.host, %address, "resolved seed");
            resolved.push((seed, address));
        }

        let forest = try_join_all(resolved.iter().map(|(seed, address)| async move {
            let address_str = address.to_string();
            let path = [(address_str.clone(), seed.port)];
            let children = self.discover(&address_str, seed.port, &path).await?;
            Ok::<_, Error>(Node::seed(&seed.host, *address, seed.port, children))
        }))
        .await?;

        info!(
            roots = forest.len(),
            nodes = forest.iter().map(Node::count).sum::<usize>(),
            depth = forest.iter().map(Node::depth).max().unwrap_or(0),
            "topology discovered"
        );
        Ok(forest)
    }

    /// Replicas of `address:port`, fully discovered. `path` holds every
    /// node from the seed down to and including this one.
    fn discover<'s>(
        &'s self,
        address: &'s str,
        port: u16,
        path: &'s [(String, u16)],
    ) -> LocalBoxFuture<'s, Result<Vec<Node>>> {
        async move {
            let text = match self
                .fetcher
                .fetch(address, port, Category::Replication)
                .await
            {
                Ok(text) => text,
                Err(e) if self.policy == FailurePolicy::Inline && e.is_node_failure() => {
                    warn!(
                        node = %format!("{}:{}", address, port),
                        error = %e,
                        "replication unavailable, treating node as a leaf"
                    );
                    return Ok(Vec::new());
                }
                Err(e) => return Err(e),
            };

            let replicas = parse_replicas(&text);
            try_join_all(replicas.iter().map(|replica| async move {
                let key = (replica.ip.clone(), replica.port);
                if path.contains(&key) {
                    warn!(
                        node = %format!("{}:{}", replica.ip, replica.port),
                        "replication cycle detected, not descending"
                    );
                    return Ok(Node::replica(replica, Vec::new()));
                }

                let mut child_path = path.to_vec();
                child_path.push(key);
                let children = self
                    .discover(&replica.ip, replica.port, &child_path)
                    .await?;
                Ok::<_, Error>(Node::replica(replica, children))
            }))
            .await
        }
        .boxed_local()
    }
}
