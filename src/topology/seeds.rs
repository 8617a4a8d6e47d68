//! Operator-supplied seed list

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::debug;

use crate::common::{Error, Result};

/// A top-level `(host, port)` entry that discovery starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    pub host: String,
    pub port: u16,
}

/// Parse `host port` pairs, one per line.
///
/// Blank lines and lines with fewer than two fields are ignored; extra
/// fields are ignored. A port that is not a valid `u16` fails the parse.
pub fn parse_seeds(input: &str) -> Result<Vec<Seed>> {
    let mut seeds = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        let mut fields = line.split_whitespace();
        let (Some(host), Some(port)) = (fields.next(), fields.next()) else {
            if !line.trim().is_empty() {
                debug!(line = idx + 1, "ignoring seed line without a port");
            }
            continue;
        };

        let port = port.parse::<u16>().map_err(|e| Error::InvalidSeed {
            line: idx + 1,
            reason: format!("invalid port `{}`: {}", port, e),
        })?;

        seeds.push(Seed {
            host: host.to_string(),
            port,
        });
    }

    Ok(seeds)
}

/// Read and parse the whole seed list from `reader`.
pub async fn read_seeds<R>(mut reader: R) -> Result<Vec<Seed>>
where
    R: AsyncRead + Unpin,
{
    let mut input = String::new();
    reader.read_to_string(&mut input).await?;
    parse_seeds(&input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seeds() {
        let seeds = parse_seeds("db1 6379\n\n  db2\t6380  \n10.0.0.9 7000 extra\n").unwrap();
        assert_eq!(
            seeds,
            vec![
                Seed { host: "db1".into(), port: 6379 },
                Seed { host: "db2".into(), port: 6380 },
                Seed { host: "10.0.0.9".into(), port: 7000 },
            ]
        );
    }

    #[test]
    fn test_short_lines_skipped() {
        assert!(parse_seeds("db1\n   \n").unwrap().is_empty());
    }

    #[test]
    fn test_bad_port_is_fatal() {
        let err = parse_seeds("db1 6379\ndb2 63x9\n").unwrap_err();
        match err {
            Error::InvalidSeed { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("63x9"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(parse_seeds("db1 70000\n").is_err());
        assert!(parse_seeds("db1 -1\n").is_err());
    }

    #[tokio::test]
    async fn test_read_seeds() {
        let seeds = read_seeds(&b"db1 6379\r\n"[..]).await.unwrap();
        assert_eq!(seeds, vec![Seed { host: "db1".into(), port: 6379 }]);
    }
}
