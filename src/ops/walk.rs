//! Query every node of a topology and render the answers as a tree
//!
//! Walking is split in two: [`Walker::walk`] fetches and filters a category
//! for every node, concurrently across siblings, and [`WalkReport::render`]
//! writes the result depth-first in discovery order. Nothing is printed until
//! all fetches have finished, so output never interleaves and an aborted
//! walk prints nothing at all.
//!
//! ```text
//! db1:6379:online
//!   +used_memory:1024
//! ├──10.0.0.2:6380:online
//!      +used_memory:2048
//!    ├──10.0.0.3:6381:online
//!         +used_memory:512
//! ```

use futures_util::future::{try_join_all, FutureExt, LocalBoxFuture};
use std::io::{self, Write};
use tracing::warn;

use crate::common::{pad_to_width, Error, FailurePolicy, Result};
use crate::info::{Category, InfoFetcher, LineFilter};
use crate::topology::Node;

/// Marker placed in front of every child label.
pub const BRANCH: &str = "├──";

/// Marker placed in front of every data line.
pub const DATA_MARKER: &str = "+";

/// Printed instead of a tree when there is nothing to walk.
pub const NOT_FOUND: &str = "not found any master/replica info";

/// Appended to the label of a node that could not be queried.
pub const UNREACHABLE: &str = "[unreachable]";

/// Fetches one category from every node in a forest.
pub struct Walker<'a, F> {
    fetcher: &'a F,
    policy: FailurePolicy,
}

/// What a walk found for one node.
#[derive(Debug)]
pub struct Visit<'n> {
    pub node: &'n Node,
    /// Filtered lines, or the failure when the node was unreachable.
    pub outcome: Result<Vec<String>>,
    pub children: Vec<Visit<'n>>,
}

/// The result of a walk, ready to be rendered.
#[derive(Debug)]
pub struct WalkReport<'n> {
    pub category: Category,
    pub roots: Vec<Visit<'n>>,
}

impl<'a, F: InfoFetcher> Walker<'a, F> {
    pub fn new(fetcher: &'a F) -> Self {
        Self {
            fetcher,
            policy: FailurePolicy::Abort,
        }
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fetch `category` from every node under `nodes` and filter it.
    ///
    /// An empty forest performs no fetches and yields an empty report.
    pub async fn walk<'n>(
        &self,
        category: Category,
        filter: &LineFilter,
        nodes: &'n [Node],
    ) -> Result<WalkReport<'n>> {
        if nodes.is_empty() {
            warn!(%category, "no nodes to query");
            return Ok(WalkReport {
                category,
                roots: Vec::new(),
            });
        }

        let roots = self.visit_all(category, filter, nodes).await?;
        Ok(WalkReport { category, roots })
    }

    fn visit_all<'s, 'n>(
        &'s self,
        category: Category,
        filter: &'s LineFilter,
        nodes: &'n [Node],
    ) -> LocalBoxFuture<'s, Result<Vec<Visit<'n>>>>
    where
        'n: 's,
    {
        async move {
            try_join_all(nodes.iter().map(|node| async move {
                let outcome = match self
                    .fetcher
                    .fetch(node.address(), node.port(), category)
                    .await
                {
                    Ok(text) => Ok(filter.apply(&text)),
                    Err(e) if self.policy == FailurePolicy::Inline && e.is_node_failure() => {
                        warn!(node = node.label(), error = %e, "node unreachable");
                        Err(e)
                    }
                    Err(e) => return Err(e),
                };

                let children = if node.is_leaf() {
                    Vec::new()
                } else {
                    self.visit_all(category, filter, node.children()).await?
                };

                Ok::<_, Error>(Visit {
                    node,
                    outcome,
                    children,
                })
            }))
            .await
        }
        .boxed_local()
    }
}

impl WalkReport<'_> {
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of nodes rendered as unreachable.
    pub fn unreachable(&self) -> usize {
        fn count(visits: &[Visit<'_>]) -> usize {
            visits
                .iter()
                .map(|v| usize::from(v.outcome.is_err()) + count(&v.children))
                .sum()
        }
        count(&self.roots)
    }

    /// Write the tree to `out`.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.roots.is_empty() {
            return writeln!(out, "{}", NOT_FOUND);
        }
        render_level("", &self.roots, out)
    }
}

/// Labels at `prefix`, data lines two columns in, children one branch deeper.
fn render_level<W: Write>(prefix: &str, visits: &[Visit<'_>], out: &mut W) -> io::Result<()> {
    let padding = pad_to_width(prefix);

    for visit in visits {
        match &visit.outcome {
            Ok(lines) => {
                writeln!(out, "{}{}", prefix, visit.node.label())?;
                for line in lines {
                    writeln!(out, "{}  {}{}", padding, DATA_MARKER, line)?;
                }
            }
            Err(_) => writeln!(out, "{}{} {}", prefix, visit.node.label(), UNREACHABLE)?,
        }

        if !visit.children.is_empty() {
            render_level(&format!("{}{}", padding, BRANCH), &visit.children, out)?;
        }
    }

    Ok(())
}
