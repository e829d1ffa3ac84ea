use crate::ElasticsearchBackend;
use std::str::FromStr;
use vessel_core::{Address, Backend, Error, Result, parse_url, url_hosts, url_path_name};

pub const DEFAULT_PORT: u16 = 9200;

/// Prefix of the host entries of a settings map, `elasticsearch-host-1` and so on.
pub const HOST_PREFIX: &str = "elasticsearch-host-";

/// Nodes of the cluster, read from `elasticsearch://host[:port][/index][?hosts=..]` or from a
/// settings map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElasticsearchConfig {
    pub hosts: Vec<Address>,
    /// Default index, when the url names one.
    pub index: Option<String>,
}

impl ElasticsearchConfig {
    pub fn parse(url: &str) -> Result<Self> {
        let mut url = parse_url(url, ElasticsearchBackend::NAME)?;
        let hosts = url_hosts(&mut url, "ELASTICSEARCH_HOSTS", DEFAULT_PORT)?;
        Ok(Self {
            hosts,
            index: url_path_name(&url),
        })
    }

    /// Hosts of the `elasticsearch-host-*` entries, ordered by key. Other entries are ignored.
    pub fn from_settings<K, V>(settings: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut entries = settings
            .into_iter()
            .filter(|(k, _)| k.as_ref().starts_with(HOST_PREFIX))
            .collect::<Vec<_>>();
        entries.sort_by(|(a, _), (b, _)| a.as_ref().cmp(b.as_ref()));
        let hosts = entries
            .iter()
            .map(|(_, v)| Address::parse(v.as_ref(), DEFAULT_PORT))
            .collect::<Result<Vec<_>>>()?;
        if hosts.is_empty() {
            let error = Error::msg(format!(
                "No `{}*` entry found in the settings",
                HOST_PREFIX
            ));
            log::error!("{:#}", error);
            return Err(error);
        }
        Ok(Self { hosts, index: None })
    }
}

impl FromStr for ElasticsearchConfig {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}
