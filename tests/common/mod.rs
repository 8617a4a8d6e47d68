//! Shared fakes for integration tests
#![allow(dead_code)]

use infotree::{Category, Error, InfoFetcher, Resolver, Result};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::net::IpAddr;

/// In-memory fetcher. Nodes without a canned response answer with empty text.
#[derive(Default)]
pub struct FakeFetcher {
    responses: HashMap<(String, u16, Category), String>,
    down: HashSet<(String, u16)>,
    calls: RefCell<Vec<(String, u16, Category)>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, address: &str, port: u16, category: Category, text: &str) -> Self {
        self.responses
            .insert((address.to_string(), port, category), text.to_string());
        self
    }

    pub fn with_replicas(
        self,
        address: &str,
        port: u16,
        replicas: &[(&str, u16, &str)],
    ) -> Self {
        let mut text = format!(
            "# Replication\r\nrole:master\r\nconnected_slaves:{}\r\n",
            replicas.len()
        );
        for (i, (ip, port, state)) in replicas.iter().enumerate() {
            text.push_str(&format!(
                "slave{}:ip={},port={},state={},offset=1042,lag=0\r\n",
                i, ip, port, state
            ));
        }
        text.push_str("master_repl_offset:1042\r\n");
        self.with(address, port, Category::Replication, &text)
    }

    pub fn down(mut self, address: &str, port: u16) -> Self {
        self.down.insert((address.to_string(), port));
        self
    }

    pub fn calls(&self) -> Vec<(String, u16, Category)> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl InfoFetcher for FakeFetcher {
    async fn fetch(&self, address: &str, port: u16, category: Category) -> Result<String> {
        self.calls
            .borrow_mut()
            .push((address.to_string(), port, category));

        if self.down.contains(&(address.to_string(), port)) {
            return Err(Error::ConnectionFailed(format!(
                "{}:{}: connection refused",
                address, port
            )));
        }

        Ok(self
            .responses
            .get(&(address.to_string(), port, category))
            .cloned()
            .unwrap_or_default())
    }
}

/// Resolver with a fixed host table.
#[derive(Default)]
pub struct StaticResolver {
    hosts: HashMap<String, IpAddr>,
}

impl StaticResolver {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            hosts: entries
                .iter()
                .map(|(host, ip)| (host.to_string(), ip.parse().unwrap()))
                .collect(),
        }
    }
}

impl Resolver for StaticResolver {
    async fn resolve(&self, host: &str) -> Result<IpAddr> {
        self.hosts.get(host).copied().ok_or_else(|| Error::Resolve {
            host: host.to_string(),
            reason: "unknown host".into(),
        })
    }
}
