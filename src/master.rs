//! Name resolution on behalf of the server.

use crate::error::Result;
use crate::protocol::name::check_domain_name;
use crate::protocol::ResourceRecord;
use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Records {
    pub answers: Vec<ResourceRecord>,
    pub name_servers: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
}

impl Records {
    fn section_mut(&mut self, section: Section) -> &mut Vec<ResourceRecord> {
        match section {
            Section::Answer => &mut self.answers,
            Section::Authority => &mut self.name_servers,
            Section::Additional => &mut self.additionals,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Answer,
    Authority,
    Additional,
}

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("no records for {0}")]
    NotFound(String),
    #[error("lookup failed: {0}")]
    Failure(String),
}

#[async_trait]
pub trait MasterFile: Send + Sync {
    async fn search(&self, name: &str) -> std::result::Result<Records, LookupError>;
}

/// Records held in memory, keyed by lowercased owner name.
#[derive(Default)]
pub struct StaticMasterFile {
    records: DashMap<String, Records>,
}

impl StaticMasterFile {
    pub fn new() -> Self {
        StaticMasterFile {
            records: DashMap::new(),
        }
    }

    /// Returns false when an equal record is already filed under `owner`.
    pub fn insert(&self, owner: &str, section: Section, record: ResourceRecord) -> Result<bool> {
        check_domain_name(owner)?;
        let mut entry = self.records.entry(owner.to_ascii_lowercase()).or_default();
        let records = entry.section_mut(section);
        if records.contains(&record) {
            return Ok(false);
        }
        records.push(record);
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl MasterFile for StaticMasterFile {
    async fn search(&self, name: &str) -> std::result::Result<Records, LookupError> {
        self.records
            .get(&name.to_ascii_lowercase())
            .map(|records| records.value().clone())
            .ok_or_else(|| LookupError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use crate::master::{LookupError, MasterFile, Section, StaticMasterFile};
    use crate::protocol::ResourceRecord;
    use std::net::Ipv4Addr;

    fn a(name: &str) -> ResourceRecord {
        ResourceRecord::a(name, 60, Ipv4Addr::new(10, 0, 0, 1)).unwrap()
    }

    #[tokio::test]
    async fn should_return_records_ignoring_case_when_search_given_known_owner() {
        let master = StaticMasterFile::new();
        master.insert("Foo.com.", Section::Answer, a("foo.com.")).unwrap();
        master
            .insert("foo.com.", Section::Authority, ResourceRecord::ns("foo.com.", 60, "ns.foo.com.").unwrap())
            .unwrap();

        let result = master.search("FOO.COM.").await.unwrap();

        assert_eq!(vec![a("foo.com.")], result.answers);
        assert_eq!(1, result.name_servers.len());
        assert!(result.additionals.is_empty());
        assert_eq!(1, master.len());
    }

    #[tokio::test]
    async fn should_return_not_found_when_search_given_unknown_owner() {
        let master = StaticMasterFile::new();

        let result = master.search("nothing.here.").await;

        assert!(matches!(result, Err(LookupError::NotFound(name)) if name == "nothing.here."));
    }

    #[test]
    fn should_skip_duplicate_when_insert_given_equal_record() {
        let master = StaticMasterFile::new();

        let first = master.insert("foo.", Section::Answer, a("foo.")).unwrap();
        let second = master.insert("foo.", Section::Answer, a("FOO.")).unwrap();

        assert!(first);
        assert!(!second);
    }

    #[test]
    fn should_return_validation_when_insert_given_relative_owner() {
        let master = StaticMasterFile::new();

        let result = master.insert("foo", Section::Answer, a("foo."));

        assert!(result.unwrap_err().is_validation());
        assert!(master.is_empty());
    }
}
