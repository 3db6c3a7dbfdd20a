use crate::error::{DnsError, Result};
use crate::master::{Section, StaticMasterFile};
use crate::protocol::resource::Soa;
use crate::protocol::ResourceRecord;
use log::LevelFilter;
use serde::Deserialize;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub port: u16,
    pub log_level: String,
    pub idle_timeout_secs: u64,
    pub records: Vec<RecordEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 2053,
            log_level: "INFO".to_string(),
            idle_timeout_secs: 20,
            records: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.level_filter()?;
        Ok(config)
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| DnsError::Config(format!("unknown log level {}", self.log_level)))
    }

    pub fn master_file(&self) -> Result<StaticMasterFile> {
        let master = StaticMasterFile::new();
        for entry in self.records.iter() {
            master.insert(&entry.owner, entry.section, entry.to_record()?)?;
        }
        Ok(master)
    }
}

/// One `[[records]]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordEntry {
    pub owner: String,
    pub section: Section,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub ttl: u32,
    pub data: String,
}

impl RecordEntry {
    pub fn to_record(&self) -> Result<ResourceRecord> {
        let name = self.name.as_str();
        let ttl = self.ttl;
        match self.record_type.to_ascii_uppercase().as_str() {
            "A" => ResourceRecord::a(name, ttl, self.parse::<Ipv4Addr>(&self.data)?),
            "AAAA" => ResourceRecord::aaaa(name, ttl, self.parse::<Ipv6Addr>(&self.data)?),
            "CNAME" => ResourceRecord::cname(name, ttl, &self.data),
            "NS" => ResourceRecord::ns(name, ttl, &self.data),
            "MX" => {
                let [preference, exchange] = self.fields::<2>()?;
                ResourceRecord::mx(name, ttl, exchange, self.parse(preference)?)
            }
            "SOA" => {
                let [mname, rname, serial, refresh, retry, expire, minimum] = self.fields::<7>()?;
                let soa = Soa::new(
                    mname,
                    rname,
                    self.parse(serial)?,
                    self.parse(refresh)?,
                    self.parse(retry)?,
                    self.parse(expire)?,
                    self.parse(minimum)?,
                )?;
                ResourceRecord::soa(name, ttl, soa)
            }
            "CAA" => ResourceRecord::caa(name, ttl, &self.data),
            _ => Err(DnsError::validation(
                "Unsupported record type",
                &self.record_type,
            )),
        }
    }

    fn fields<const N: usize>(&self) -> Result<[&str; N]> {
        let fields: Vec<&str> = self.data.split_whitespace().collect();
        let count = fields.len();
        std::convert::TryInto::try_into(fields).map_err(|_| {
            DnsError::validation(
                format!("{} record data needs {} fields, found {}", self.record_type, N, count),
                &self.data,
            )
        })
    }

    fn parse<T: FromStr>(&self, field: &str) -> Result<T> {
        field.parse().map_err(|_| {
            DnsError::validation(format!("Bad {} record data", self.record_type), field)
        })
    }
}

pub async fn init_from_toml(path: &str) -> Result<Config> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| DnsError::Config(format!("cannot read {}: {}", path, e)))?;
    Config::from_toml(&content)
}
