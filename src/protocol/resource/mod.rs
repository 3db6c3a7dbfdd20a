mod caa;
mod cname;
mod ipv4;
mod ipv6;
mod mx;
mod ns;
mod soa;

pub use caa::Caa;
pub use cname::CName;
pub use mx::Mx;
pub use ns::Ns;
pub use soa::Soa;

use crate::cursor::Cursor;
use crate::error::{DnsError, Result};
use crate::protocol::name::{check_domain_name, decode_name, encode_name};
use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::net::{Ipv4Addr, Ipv6Addr};

pub const A_TYPE: u16 = 1;
pub const NS_TYPE: u16 = 2;
pub const CNAME_TYPE: u16 = 5;
pub const SOA_TYPE: u16 = 6;
pub const MX_TYPE: u16 = 15;
pub const AAAA_TYPE: u16 = 28;
pub const CAA_TYPE: u16 = 257;

const CLASS_IN: u16 = 1;

/// Type-specific record payload.
///
/// `decode` is handed a cursor bounded to exactly RDLENGTH bytes.
pub trait RData: Sized {
    const TYPE_VALUE: u16;

    fn decode(cursor: &mut Cursor<'_>) -> Result<Self>;

    fn encode(&self, buf: &mut Vec<u8>);

    /// Encoded RDATA length, recomputed from the current field values.
    fn data_len(&self) -> usize;
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum RecordData {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    CName(CName),
    Ns(Ns),
    Mx(Mx),
    Soa(Soa),
    Caa(Caa),
    /// The raw type code of a record this codec does not understand. Its
    /// RDATA was skipped on decode and is not kept.
    Unknown(u16),
}

impl RecordData {
    pub fn type_value(&self) -> u16 {
        match self {
            RecordData::A(_) => Ipv4Addr::TYPE_VALUE,
            RecordData::AAAA(_) => Ipv6Addr::TYPE_VALUE,
            RecordData::CName(_) => CName::TYPE_VALUE,
            RecordData::Ns(_) => Ns::TYPE_VALUE,
            RecordData::Mx(_) => Mx::TYPE_VALUE,
            RecordData::Soa(_) => Soa::TYPE_VALUE,
            RecordData::Caa(_) => Caa::TYPE_VALUE,
            RecordData::Unknown(type_value) => *type_value,
        }
    }

    fn decode(type_value: u16, cursor: &mut Cursor<'_>) -> Result<Self> {
        let data = match type_value {
            A_TYPE => RecordData::A(Ipv4Addr::decode(cursor)?),
            AAAA_TYPE => RecordData::AAAA(Ipv6Addr::decode(cursor)?),
            CNAME_TYPE => RecordData::CName(CName::decode(cursor)?),
            NS_TYPE => RecordData::Ns(Ns::decode(cursor)?),
            MX_TYPE => RecordData::Mx(Mx::decode(cursor)?),
            SOA_TYPE => RecordData::Soa(Soa::decode(cursor)?),
            CAA_TYPE => RecordData::Caa(Caa::decode(cursor)?),
            _ => {
                cursor.take_slice(cursor.remaining())?;
                RecordData::Unknown(type_value)
            }
        };
        Ok(data)
    }

    fn encode(&self, buf: &mut Vec<u8>) -> Result<()> {
        match self {
            RecordData::A(data) => write_rdata(data, buf),
            RecordData::AAAA(data) => write_rdata(data, buf),
            RecordData::CName(data) => write_rdata(data, buf),
            RecordData::Ns(data) => write_rdata(data, buf),
            RecordData::Mx(data) => write_rdata(data, buf),
            RecordData::Soa(data) => write_rdata(data, buf),
            RecordData::Caa(data) => write_rdata(data, buf),
            RecordData::Unknown(type_value) => {
                return Err(DnsError::Unencodable(format!(
                    "unknown or unsupported record type {}",
                    type_value
                )));
            }
        }
        Ok(())
    }
}

fn write_rdata<T: RData>(data: &T, buf: &mut Vec<u8>) {
    buf.extend(&(data.data_len() as u16).to_be_bytes());
    data.encode(buf);
}

#[derive(Debug, Clone)]
pub struct ResourceRecord {
    name: String,
    ttl: u32,
    rd_length: u16,
    data: RecordData,
}

impl ResourceRecord {
    pub fn new(name: &str, ttl: u32, data: RecordData) -> Result<Self> {
        check_domain_name(name)?;
        Ok(ResourceRecord {
            name: name.to_string(),
            ttl,
            rd_length: 0,
            data,
        })
    }

    pub fn a(name: &str, ttl: u32, address: Ipv4Addr) -> Result<Self> {
        ResourceRecord::new(name, ttl, RecordData::A(address))
    }

    pub fn aaaa(name: &str, ttl: u32, address: Ipv6Addr) -> Result<Self> {
        ResourceRecord::new(name, ttl, RecordData::AAAA(address))
    }

    pub fn cname(name: &str, ttl: u32, canonical_name: &str) -> Result<Self> {
        ResourceRecord::new(name, ttl, RecordData::CName(CName::new(canonical_name)?))
    }

    pub fn ns(name: &str, ttl: u32, name_server: &str) -> Result<Self> {
        ResourceRecord::new(name, ttl, RecordData::Ns(Ns::new(name_server)?))
    }

    pub fn mx(name: &str, ttl: u32, exchange: &str, preference: u16) -> Result<Self> {
        ResourceRecord::new(name, ttl, RecordData::Mx(Mx::new(exchange, preference)?))
    }

    pub fn soa(name: &str, ttl: u32, soa: Soa) -> Result<Self> {
        ResourceRecord::new(name, ttl, RecordData::Soa(soa))
    }

    pub fn caa(name: &str, ttl: u32, issuer: &str) -> Result<Self> {
        ResourceRecord::new(name, ttl, RecordData::Caa(Caa::new(issuer)?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// RDLENGTH as it was on the wire; 0 for records built in code.
    pub fn rd_length(&self) -> u16 {
        self.rd_length
    }

    pub fn type_value(&self) -> u16 {
        self.data.type_value()
    }

    pub fn data(&self) -> &RecordData {
        &self.data
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self.data, RecordData::Unknown(_))
    }

    pub fn set_name(&mut self, name: &str) -> Result<&mut Self> {
        check_domain_name(name)?;
        self.name = name.to_string();
        Ok(self)
    }

    pub fn set_ttl(&mut self, ttl: u32) -> &mut Self {
        self.ttl = ttl;
        self
    }

    pub fn set_data(&mut self, data: RecordData) -> &mut Self {
        self.data = data;
        self
    }

    /// Fails with [`DnsError::Unencodable`] for unknown record types.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.encode(&mut buf)?;
        Ok(buf)
    }

    /// Appends the wire form to `buf`; on failure `buf` is left untouched.
    pub fn encode(&self, buf: &mut Vec<u8>) -> Result<()> {
        let mut record = Vec::new();
        encode_name(&self.name, &mut record);
        record.extend(&self.type_value().to_be_bytes());
        record.extend(&CLASS_IN.to_be_bytes());
        record.extend(&self.ttl.to_be_bytes());
        self.data.encode(&mut record)?;
        buf.extend(record);
        Ok(())
    }
}

impl<'a, 'b> TryFrom<&'a mut Cursor<'b>> for ResourceRecord {
    type Error = DnsError;

    fn try_from(cursor: &'a mut Cursor<'b>) -> Result<Self> {
        let name = decode_name(cursor)?;
        let type_value = cursor.take_u16()?;
        let class = cursor.take_u16()?;
        if class != CLASS_IN {
            return Err(DnsError::validation("Record class must be 1 (IN)", class));
        }
        let ttl = cursor.take_u32()?;
        let rd_length = cursor.take_u16()?;
        let mut rdata = cursor.sub_cursor(rd_length as usize)?;
        let data = RecordData::decode(type_value, &mut rdata).map_err(|e| match e {
            DnsError::Incomplete(_) => {
                DnsError::validation("Record data overruns its declared RDLENGTH", rd_length)
            }
            e => e,
        })?;
        if !rdata.is_exhausted() {
            return Err(DnsError::validation(
                "RDLENGTH is longer than the record data",
                rd_length,
            ));
        }
        Ok(ResourceRecord {
            name,
            ttl,
            rd_length,
            data,
        })
    }
}

impl PartialEq for ResourceRecord {
    fn eq(&self, other: &Self) -> bool {
        self.type_value() == other.type_value()
            && self.name.eq_ignore_ascii_case(&other.name)
            && self.ttl == other.ttl
            && self.data == other.data
            && (!self.is_unknown() || self.rd_length == other.rd_length)
    }
}

impl Eq for ResourceRecord {}

impl Hash for ResourceRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_value().hash(state);
        self.name.to_ascii_lowercase().hash(state);
        self.ttl.hash(state);
        self.data.hash(state);
        if self.is_unknown() {
            self.rd_length.hash(state);
        }
    }
}

impl Display for ResourceRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (kind, detail) = match &self.data {
            RecordData::A(address) => ("A", format!(" address={}", address)),
            RecordData::AAAA(address) => ("AAAA", format!(" address={}", address)),
            RecordData::CName(data) => ("CName", format!(" canonicalname={}", data.canonical_name())),
            RecordData::Ns(data) => ("NS", format!(" nameserver={}", data.name_server())),
            RecordData::Mx(data) => (
                "MX",
                format!(" exchange={} preference={}", data.exchange(), data.preference()),
            ),
            RecordData::Soa(data) => ("SOA", format!(" {}", data)),
            RecordData::Caa(data) => ("CAA", format!(" issuer={}", data.issuer())),
            RecordData::Unknown(_) => ("Unknown", String::new()),
        };
        write!(f, "{}: name={} ttl={}{}", kind, self.name, self.ttl, detail)
    }
}
