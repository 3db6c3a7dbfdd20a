use crate::cursor::Cursor;
use crate::error::Result;
use crate::protocol::name::{check_domain_name, decode_name, encode_name, encoded_name_len};
use crate::protocol::resource::{RData, CNAME_TYPE};
use std::hash::{Hash, Hasher};

/// Alias target of a CNAME record.
#[derive(Debug, Clone)]
pub struct CName {
    canonical_name: String,
}

impl CName {
    pub fn new(canonical_name: &str) -> Result<Self> {
        check_domain_name(canonical_name)?;
        Ok(CName {
            canonical_name: canonical_name.to_string(),
        })
    }

    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    pub fn set_canonical_name(&mut self, canonical_name: &str) -> Result<()> {
        check_domain_name(canonical_name)?;
        self.canonical_name = canonical_name.to_string();
        Ok(())
    }
}

impl RData for CName {
    const TYPE_VALUE: u16 = CNAME_TYPE;

    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        Ok(CName {
            canonical_name: decode_name(cursor)?,
        })
    }

    fn encode(&self, buf: &mut Vec<u8>) {
        encode_name(&self.canonical_name, buf);
    }

    fn data_len(&self) -> usize {
        encoded_name_len(&self.canonical_name)
    }
}

impl PartialEq for CName {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_name.eq_ignore_ascii_case(&other.canonical_name)
    }
}

impl Eq for CName {}

impl Hash for CName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_name.to_ascii_lowercase().hash(state);
    }
}
