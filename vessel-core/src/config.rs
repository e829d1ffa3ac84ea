use crate::{Error, Result};
use anyhow::Context;
use std::{
    env,
    fmt::{self, Display, Formatter},
};
use url::Url;
use urlencoding::decode;

/// Host and port of a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    pub host: String,
    pub port: u16,
}

impl Address {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parse `host`, `host:port` or `[ipv6]:port`, using `default_port` when the port is missing.
    pub fn parse(value: &str, default_port: u16) -> Result<Self> {
        let value = value.trim();
        let (host, port) = if let Some(rest) = value.strip_prefix('[') {
            let Some((host, rest)) = rest.split_once(']') else {
                return Err(Error::msg(format!("Unterminated IPv6 address in `{}`", value)));
            };
            (host, rest.strip_prefix(':'))
        } else {
            match value.rsplit_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (value, None),
            }
        };
        if host.is_empty() {
            return Err(Error::msg(format!("Missing host in `{}`", value)));
        }
        if host.contains(':') && !value.starts_with('[') {
            return Err(Error::msg(format!(
                "IPv6 addresses must be enclosed in brackets: `{}`",
                value
            )));
        }
        let port = match port {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("Invalid port in `{}`", value))?,
            None => default_port,
        };
        Ok(Self::new(host, port))
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Decode and parse a connection url, checking it starts with `<name>://`.
pub fn parse_url(url: &str, name: &str) -> Result<Url> {
    let context = || format!("While trying to parse the url `{}`", url);
    let decoded = decode(url).with_context(context)?;
    let prefix = format!("{}://", name);
    if !decoded.starts_with(&prefix) {
        let error = Error::msg(format!("The url must start with `{}`", prefix)).context(context());
        log::error!("{:#}", error);
        return Err(error);
    }
    Url::parse(&decoded).with_context(context)
}

/// Remove the query parameter `key` from `url`, falling back to the environment variable `env_var`.
pub fn take_url_param(url: &mut Url, key: &str, env_var: &str) -> Option<String> {
    let mut value = None;
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    if let Some(pos) = pairs.iter().position(|(k, _)| k == key) {
        let (_, v) = pairs.remove(pos);
        value = Some(v);
    }
    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut()
            .clear()
            .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }
    value.or_else(|| env::var(env_var).ok())
}

/// Hosts of a connection url: the authority plus the comma separated `hosts` parameter
/// (or `env_var`).
pub fn url_hosts(url: &mut Url, env_var: &str, default_port: u16) -> Result<Vec<Address>> {
    let mut result = Vec::new();
    if let Some(host) = url.host_str() {
        let host = host.trim_start_matches('[').trim_end_matches(']');
        result.push(Address::new(host, url.port().unwrap_or(default_port)));
    }
    if let Some(hosts) = take_url_param(url, "hosts", env_var) {
        for host in hosts.split(',').filter(|v| !v.trim().is_empty()) {
            result.push(Address::parse(host, default_port)?);
        }
    }
    if result.is_empty() {
        return Err(Error::msg(format!("No host found in `{}`", url)));
    }
    Ok(result)
}

/// First path segment of the url (keyspace, database, index).
pub fn url_path_name(url: &Url) -> Option<String> {
    url.path_segments()
        .and_then(|mut v| v.next())
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}
