//! Hostname resolution for seeds

use std::net::IpAddr;

use crate::common::{Error, Result};

/// Turns a seed hostname into the address that will be queried.
pub trait Resolver {
    async fn resolve(&self, host: &str) -> Result<IpAddr>;
}

/// Resolver backed by the system's name lookup; the first address wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl Resolver for SystemResolver {
    async fn resolve(&self, host: &str) -> Result<IpAddr> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(ip);
        }

        let mut addrs = tokio::net::lookup_host((host, 0))
            .await
            .map_err(|e| Error::Resolve {
                host: host.to_string(),
                reason: e.to_string(),
            })?;

        addrs.next().map(|addr| addr.ip()).ok_or_else(|| Error::Resolve {
            host: host.to_string(),
            reason: "no addresses returned".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_literal_addresses() {
        let ip = SystemResolver.resolve("10.0.0.1").await.unwrap();
        assert_eq!(ip, "10.0.0.1".parse::<IpAddr>().unwrap());

        let ip = SystemResolver.resolve("::1").await.unwrap();
        assert!(ip.is_loopback());
    }

    #[tokio::test]
    async fn test_localhost() {
        let ip = SystemResolver.resolve("localhost").await.unwrap();
        assert!(ip.is_loopback());
    }
}
