//! Command dispatch for one-shot queries and the interactive loop

use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::common::Result;
use crate::info::{Category, InfoFetcher, LineFilter};
use crate::ops::walk::Walker;
use crate::topology::Node;

pub const PROMPT: &str = "> ";

/// What the first word of an interactive line asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Query(Category),
    Exit,
    /// Anything unrecognized, including an empty line: runs a replication
    /// query with the remaining words as key prefixes.
    Fallback,
}

/// Whether the interactive loop keeps reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Split an interactive line into its verb and key-prefix arguments.
pub fn parse_line(line: &str) -> (Verb, Vec<String>) {
    let trimmed = line.trim();
    if trimmed == "exit" || trimmed == "quit" {
        return (Verb::Exit, Vec::new());
    }

    let mut words = trimmed.split_whitespace();
    let verb = match words.next().map(str::parse::<Category>) {
        Some(Ok(category)) => Verb::Query(category),
        Some(Err(_)) | None => Verb::Fallback,
    };
    (verb, words.map(str::to_string).collect())
}

/// A discovered forest plus the walker used to query it.
pub struct Session<'a, F> {
    forest: Vec<Node>,
    walker: Walker<'a, F>,
}

impl<'a, F: InfoFetcher> Session<'a, F> {
    pub fn new(forest: Vec<Node>, walker: Walker<'a, F>) -> Self {
        Self { forest, walker }
    }

    pub fn forest(&self) -> &[Node] {
        &self.forest
    }

    /// Walk `category` across the forest and render it to `out`.
    pub async fn query<W: Write>(
        &self,
        category: Category,
        prefixes: Vec<String>,
        out: &mut W,
    ) -> Result<()> {
        let filter = LineFilter::for_category(category, prefixes);
        debug!(%category, prefixes = ?filter.prefixes(), "running query");

        let report = self.walker.walk(category, &filter, &self.forest).await?;
        report.render(out)?;
        out.flush()?;

        let unreachable = report.unreachable();
        if unreachable > 0 {
            info!(
                category = %report.category,
                unreachable,
                "query finished with unreachable nodes"
            );
        }
        Ok(())
    }

    /// Run one interactive line.
    pub async fn execute<W: Write>(&self, line: &str, out: &mut W) -> Result<Flow> {
        match parse_line(line) {
            (Verb::Exit, _) => Ok(Flow::Exit),
            (Verb::Query(category), prefixes) => {
                self.query(category, prefixes, out).await?;
                Ok(Flow::Continue)
            }
            (Verb::Fallback, prefixes) => {
                self.query(Category::Replication, prefixes, out).await?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Prompt, read and execute lines until `exit`, `quit` or end of input.
    pub async fn run_interactive<R, W>(&self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(out)?;
                return Ok(());
            };
            if self.execute(&line, out).await? == Flow::Exit {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_verbs() {
        assert_eq!(
            parse_line("memory used_memory used_memory_rss"),
            (
                Verb::Query(Category::Memory),
                vec!["used_memory".to_string(), "used_memory_rss".to_string()]
            )
        );
        assert_eq!(parse_line("  keyspace  "), (Verb::Query(Category::Keyspace), vec![]));
    }

    #[test]
    fn test_parse_exit() {
        assert_eq!(parse_line("exit").0, Verb::Exit);
        assert_eq!(parse_line("quit\n").0, Verb::Exit);
    }

    #[test]
    fn test_unknown_verb_falls_back() {
        assert_eq!(
            parse_line("role master_link_status"),
            (Verb::Fallback, vec!["master_link_status".to_string()])
        );
        assert_eq!(parse_line("Memory used").0, Verb::Fallback);
        assert_eq!(parse_line(""), (Verb::Fallback, vec![]));
        assert_eq!(parse_line("exit now").0, Verb::Fallback);
    }
}
