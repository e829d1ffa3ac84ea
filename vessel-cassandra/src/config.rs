use crate::{CassandraBackend, MemoryCatalog};
use std::str::FromStr;
use vessel_core::{
    Address, Backend, Error, Result, parse_url, take_url_param, url_hosts, url_path_name,
};

pub const DEFAULT_PORT: u16 = 9042;

/// Connection settings read from `cassandra://host[:port]/keyspace[?hosts=..&consistency=..]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CassandraConfig {
    pub hosts: Vec<Address>,
    pub keyspace: String,
    /// Consistency level requested for the statements, when present.
    pub consistency: Option<String>,
}

impl CassandraConfig {
    pub fn parse(url: &str) -> Result<Self> {
        let mut url = parse_url(url, <CassandraBackend<MemoryCatalog> as Backend>::NAME)?;
        let hosts = url_hosts(&mut url, "CASSANDRA_HOSTS", DEFAULT_PORT)?;
        let consistency = take_url_param(&mut url, "consistency", "CASSANDRA_CONSISTENCY")
            .map(|v| v.to_uppercase());
        let Some(keyspace) =
            url_path_name(&url).or_else(|| take_url_param(&mut url, "keyspace", "CASSANDRA_KEYSPACE"))
        else {
            let error = Error::msg(format!("Missing the keyspace in `{}`", url));
            log::error!("{:#}", error);
            return Err(error);
        };
        Ok(Self {
            hosts,
            keyspace,
            consistency,
        })
    }
}

impl FromStr for CassandraConfig {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}
