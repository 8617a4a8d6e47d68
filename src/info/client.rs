//! Node info fetcher speaking the RESP request/response protocol
//!
//! Each fetch opens a fresh connection, optionally authenticates with the
//! shared credential, and issues a single `INFO <category>` command. The
//! bulk-string reply is returned verbatim; splitting and filtering happen
//! in [`crate::info::filter`].

use bytes::{BufMut, BytesMut};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::debug;

use crate::common::{Error, Result};
use crate::info::Category;

/// Longest reply header accepted, CRLF included.
pub const MAX_HEADER_LEN: u64 = 64 * 1024;

/// Largest bulk reply accepted (the server-side `proto-max-bulk-len` default).
pub const MAX_BULK_LEN: u64 = 512 * 1024 * 1024;

/// Source of raw INFO text for a single node.
pub trait InfoFetcher {
    async fn fetch(&self, address: &str, port: u16, category: Category) -> Result<String>;
}

/// A decoded RESP reply. Arrays are never returned by `INFO` or `AUTH`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Status(String),
    Error(String),
    Integer(i64),
    Bulk(Option<Vec<u8>>),
}

/// Encode a command as a RESP array of bulk strings.
pub fn encode_command(args: &[&str]) -> BytesMut {
    let mut buf = BytesMut::with_capacity(16 + args.iter().map(|a| a.len() + 16).sum::<usize>());
    buf.put_slice(format!("*{}\r\n", args.len()).as_bytes());
    for arg in args {
        buf.put_slice(format!("${}\r\n", arg.len()).as_bytes());
        buf.put_slice(arg.as_bytes());
        buf.put_slice(b"\r\n");
    }
    buf
}

/// Read one reply from `reader`.
pub async fn read_reply<R>(reader: &mut R) -> Result<Reply>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    if (&mut *reader).take(MAX_HEADER_LEN).read_line(&mut line).await? == 0 {
        return Err(Error::Protocol("connection closed before reply".into()));
    }
    let header = line
        .strip_suffix("\r\n")
        .ok_or_else(|| Error::Protocol(format!("unterminated reply header {:?}", line)))?;

    let Some(kind) = header.chars().next() else {
        return Err(Error::Protocol("empty reply header".into()));
    };
    let rest = &header[kind.len_utf8()..];

    match kind {
        '+' => Ok(Reply::Status(rest.to_string())),
        '-' => Ok(Reply::Error(rest.to_string())),
        ':' => rest
            .parse()
            .map(Reply::Integer)
            .map_err(|_| Error::Protocol(format!("invalid integer reply {:?}", rest))),
        '$' => {
            let len: i64 = rest
                .parse()
                .map_err(|_| Error::Protocol(format!("invalid bulk length {:?}", rest)))?;
            if len < 0 {
                return Ok(Reply::Bulk(None));
            }
            let len = u64::try_from(len)
                .ok()
                .filter(|len| *len <= MAX_BULK_LEN)
                .ok_or_else(|| Error::Protocol(format!("bulk length {} over limit", rest)))?;

            let mut body = Vec::new();
            (&mut *reader).take(len + 2).read_to_end(&mut body).await?;
            if body.len() as u64 != len + 2 {
                return Err(Error::Protocol("bulk reply truncated".into()));
            }
            if !body.ends_with(b"\r\n") {
                return Err(Error::Protocol("bulk reply not terminated by CRLF".into()));
            }
            body.truncate(body.len() - 2);
            Ok(Reply::Bulk(Some(body)))
        }
        other => Err(Error::Protocol(format!("unsupported reply type `{}`", other))),
    }
}

/// [`InfoFetcher`] backed by a TCP connection per request.
#[derive(Debug, Clone, Default)]
pub struct RespInfoFetcher {
    credential: Option<String>,
    timeout: Option<Duration>,
}

impl RespInfoFetcher {
    /// An empty credential is treated as no credential.
    pub fn new(credential: Option<String>, timeout: Option<Duration>) -> Self {
        Self {
            credential: credential.filter(|c| !c.is_empty()),
            timeout,
        }
    }

    async fn query(
        &self,
        node: &str,
        address: &str,
        port: u16,
        category: Category,
    ) -> Result<String> {
        let stream = TcpStream::connect((address, port))
            .await
            .map_err(|e| Error::ConnectionFailed(format!("{}: {}", node, e)))?;
        let (reader, mut writer) = stream.into_split();
        let mut reader = BufReader::new(reader);

        if let Some(credential) = &self.credential {
            writer.write_all(&encode_command(&["AUTH", credential.as_str()])).await?;
            match read_reply(&mut reader).await? {
                Reply::Status(_) => {}
                Reply::Error(reason) => {
                    return Err(Error::Auth {
                        node: node.to_string(),
                        reason,
                    })
                }
                other => {
                    return Err(Error::Protocol(format!(
                        "unexpected AUTH reply from {}: {:?}",
                        node, other
                    )))
                }
            }
        }

        writer
            .write_all(&encode_command(&["INFO", category.as_str()]))
            .await?;
        match read_reply(&mut reader).await? {
            Reply::Bulk(Some(body)) => Ok(String::from_utf8_lossy(&body).into_owned()),
            Reply::Bulk(None) => Ok(String::new()),
            Reply::Error(reason) => Err(Error::Server {
                node: node.to_string(),
                reason,
            }),
            other => Err(Error::Protocol(format!(
                "unexpected INFO reply from {}: {:?}",
                node, other
            ))),
        }
    }
}

impl InfoFetcher for RespInfoFetcher {
    async fn fetch(&self, address: &str, port: u16, category: Category) -> Result<String> {
        let node = format!("{}:{}", address, port);
        debug!(node = %node, category = %category, "fetching INFO");

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.query(&node, address, port, category))
                .await
                .map_err(|_| {
                    Error::Timeout(format!("INFO {} from {} after {:?}", category, node, limit))
                })?,
            None => self.query(&node, address, port, category).await,
        }
    }
}
