use crate::cursor::Cursor;
use crate::error::{DnsError, Result};
use crate::protocol::resource::{RData, CAA_TYPE};
use std::hash::{Hash, Hasher};

/// Flags byte 0 followed by tag length 5.
const CAA_PREAMBLE: u16 = 0x0005;
const CAA_TAG: &[u8] = b"issue";
const CAA_FIXED_LEN: usize = 2 + 5;
const MAX_ISSUER_LEN: usize = u16::MAX as usize - CAA_FIXED_LEN;

/// Only the `issue` property is supported.
#[derive(Debug, Clone)]
pub struct Caa {
    issuer: String,
}

impl Caa {
    pub fn new(issuer: &str) -> Result<Self> {
        check_issuer(issuer.as_bytes())?;
        Ok(Caa {
            issuer: issuer.to_string(),
        })
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn set_issuer(&mut self, issuer: &str) -> Result<()> {
        check_issuer(issuer.as_bytes())?;
        self.issuer = issuer.to_string();
        Ok(())
    }
}

fn check_issuer(issuer: &[u8]) -> Result<()> {
    if issuer.len() > MAX_ISSUER_LEN {
        return Err(DnsError::validation("CAA issuer too long", issuer.len()));
    }
    match issuer.iter().find(|b| !(0x21..=0x7E).contains(*b)) {
        Some(b) => Err(DnsError::validation(
            "CAA issuer must be printable ASCII",
            format!("0x{:02X}", b),
        )),
        None => Ok(()),
    }
}

impl RData for Caa {
    const TYPE_VALUE: u16 = CAA_TYPE;

    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        let rd_length = cursor.remaining();
        if rd_length < CAA_FIXED_LEN {
            return Err(DnsError::validation("CAA record data is too short", rd_length));
        }
        let preamble = cursor.take_u16()?;
        if preamble != CAA_PREAMBLE {
            return Err(DnsError::validation(
                "CAA flags and tag length must be 0x0005",
                format!("0x{:04X}", preamble),
            ));
        }
        let tag = cursor.take_slice(CAA_TAG.len())?;
        if tag != CAA_TAG {
            return Err(DnsError::validation(
                "CAA tag must be \"issue\"",
                String::from_utf8_lossy(tag),
            ));
        }
        let issuer = cursor.take_slice(cursor.remaining())?;
        check_issuer(issuer)?;
        Ok(Caa {
            issuer: issuer.iter().map(|b| *b as char).collect(),
        })
    }

    fn encode(&self, buf: &mut Vec<u8>) {
        buf.extend(&CAA_PREAMBLE.to_be_bytes());
        buf.extend(CAA_TAG);
        buf.extend(self.issuer.bytes());
    }

    fn data_len(&self) -> usize {
        CAA_FIXED_LEN + self.issuer.len()
    }
}

impl PartialEq for Caa {
    fn eq(&self, other: &Self) -> bool {
        self.issuer.eq_ignore_ascii_case(&other.issuer)
    }
}

impl Eq for Caa {}

impl Hash for Caa {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.issuer.to_ascii_lowercase().hash(state);
    }
}
