use crate::MongoBackend;
use std::str::FromStr;
use vessel_core::{
    Address, Backend, Error, Result, parse_url, take_url_param, url_hosts, url_path_name,
};

pub const DEFAULT_PORT: u16 = 27017;

/// Connection settings read from `mongodb://host[:port]/database[?replicaSet=..&authSource=..]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    pub hosts: Vec<Address>,
    pub database: String,
    pub replica_set: Option<String>,
    /// Database holding the credentials, the target database when missing.
    pub auth_source: Option<String>,
}

impl MongoConfig {
    pub fn parse(url: &str) -> Result<Self> {
        let mut url = parse_url(url, MongoBackend::NAME)?;
        let hosts = url_hosts(&mut url, "MONGODB_HOSTS", DEFAULT_PORT)?;
        let replica_set = take_url_param(&mut url, "replicaSet", "MONGODB_REPLICA_SET");
        let auth_source = take_url_param(&mut url, "authSource", "MONGODB_AUTH_SOURCE");
        let Some(database) = url_path_name(&url) else {
            let error = Error::msg(format!("Missing the database in `{}`", url));
            log::error!("{:#}", error);
            return Err(error);
        };
        Ok(Self {
            hosts,
            database,
            replica_set,
            auth_source,
        })
    }
}

impl FromStr for MongoConfig {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}
