//! Replica descriptors from `INFO replication`
//!
//! A master lists each connected replica on its own line:
//!
//! ```text
//! slave0:ip=10.0.0.2,port=6380,state=online,offset=1042,lag=0
//! ```
//!
//! Everything else in the section (headers, `slave_repl_offset:...`,
//! half-written entries) is noise for discovery and is skipped.

use tracing::debug;

const MARKER: &str = "slave";

/// Where a replica can be reached and the state its master reports for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicaDescriptor {
    pub ip: String,
    pub port: u16,
    pub state: String,
}

/// Parse a single `slave<N>:ip=..,port=..,state=..` line.
pub fn parse_replica_line(line: &str) -> Option<ReplicaDescriptor> {
    let (index, fields) = line.strip_prefix(MARKER)?.split_once(':')?;
    if !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let (mut ip, mut port, mut state) = (None, None, None);
    for field in fields.split(',') {
        match field.split_once('=') {
            Some(("ip", value)) => ip = Some(value),
            Some(("port", value)) => port = Some(value),
            Some(("state", value)) => state = Some(value),
            _ => {}
        }
    }

    Some(ReplicaDescriptor {
        ip: ip.filter(|v| !v.is_empty())?.to_string(),
        port: port?.parse().ok()?,
        state: state.filter(|v| !v.is_empty())?.to_string(),
    })
}

/// All replica descriptors in `text`, in the order the master listed them.
pub fn parse_replicas(text: &str) -> Vec<ReplicaDescriptor> {
    text.lines()
        .filter(|line| line.starts_with(MARKER))
        .filter_map(|line| {
            let replica = parse_replica_line(line);
            if replica.is_none() {
                debug!(line, "skipping line that is not a replica descriptor");
            }
            replica
        })
        .collect()
}
