use crate::cursor::Cursor;
use crate::error::Result;
use crate::protocol::name::{check_domain_name, decode_name, encode_name, encoded_name_len};
use crate::protocol::resource::{RData, SOA_TYPE};
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// Start of authority for a zone.
///
/// `mname` is the primary name server and `rname` the mailbox of the
/// person responsible, written as a domain name. The five counters are
/// carried verbatim; nothing here interprets them.
#[derive(Debug, Clone)]
pub struct Soa {
    mname: String,
    rname: String,
    serial: u32,
    refresh: u32,
    retry: u32,
    expire: u32,
    minimum: u32,
}

impl Soa {
    pub fn new(
        mname: &str,
        rname: &str,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    ) -> Result<Self> {
        check_domain_name(mname)?;
        check_domain_name(rname)?;
        Ok(Soa {
            mname: mname.to_string(),
            rname: rname.to_string(),
            serial,
            refresh,
            retry,
            expire,
            minimum,
        })
    }

    pub fn mname(&self) -> &str {
        &self.mname
    }

    pub fn rname(&self) -> &str {
        &self.rname
    }

    pub fn serial(&self) -> u32 {
        self.serial
    }

    pub fn refresh(&self) -> u32 {
        self.refresh
    }

    pub fn retry(&self) -> u32 {
        self.retry
    }

    pub fn expire(&self) -> u32 {
        self.expire
    }

    pub fn minimum(&self) -> u32 {
        self.minimum
    }

    pub fn set_mname(&mut self, mname: &str) -> Result<()> {
        check_domain_name(mname)?;
        self.mname = mname.to_string();
        Ok(())
    }

    pub fn set_rname(&mut self, rname: &str) -> Result<()> {
        check_domain_name(rname)?;
        self.rname = rname.to_string();
        Ok(())
    }

    pub fn set_serial(&mut self, serial: u32) {
        self.serial = serial;
    }

    pub fn set_refresh(&mut self, refresh: u32) {
        self.refresh = refresh;
    }

    pub fn set_retry(&mut self, retry: u32) {
        self.retry = retry;
    }

    pub fn set_expire(&mut self, expire: u32) {
        self.expire = expire;
    }

    pub fn set_minimum(&mut self, minimum: u32) {
        self.minimum = minimum;
    }

    fn counters(&self) -> [u32; 5] {
        [self.serial, self.refresh, self.retry, self.expire, self.minimum]
    }
}

impl RData for Soa {
    const TYPE_VALUE: u16 = SOA_TYPE;

    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        Ok(Soa {
            mname: decode_name(cursor)?,
            rname: decode_name(cursor)?,
            serial: cursor.take_u32()?,
            refresh: cursor.take_u32()?,
            retry: cursor.take_u32()?,
            expire: cursor.take_u32()?,
            minimum: cursor.take_u32()?,
        })
    }

    fn encode(&self, buf: &mut Vec<u8>) {
        encode_name(&self.mname, buf);
        encode_name(&self.rname, buf);
        for counter in self.counters().iter() {
            buf.extend(&counter.to_be_bytes());
        }
    }

    fn data_len(&self) -> usize {
        encoded_name_len(&self.mname) + encoded_name_len(&self.rname) + 20
    }
}

impl PartialEq for Soa {
    fn eq(&self, other: &Self) -> bool {
        self.mname.eq_ignore_ascii_case(&other.mname)
            && self.rname.eq_ignore_ascii_case(&other.rname)
            && self.counters() == other.counters()
    }
}

impl Eq for Soa {}

impl Hash for Soa {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mname.to_ascii_lowercase().hash(state);
        self.rname.to_ascii_lowercase().hash(state);
        self.counters().hash(state);
    }
}

impl Display for Soa {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "mname={} rname={} serial={} refresh={} retry={} expire={} minimum={}",
            self.mname, self.rname, self.serial, self.refresh, self.retry, self.expire, self.minimum
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::cursor::Cursor;
    use crate::protocol::resource::{RData, RecordData, ResourceRecord, Soa};
    use std::convert::TryFrom;

    fn soa_rdata() -> Vec<u8> {
        let mut rdata = vec![2u8, b'n', b's', 0, 5, b'a', b'd', b'm', b'i', b'n', 0];
        for counter in [2021u32, 3600, 600, 86400, 60].iter() {
            rdata.extend(&counter.to_be_bytes());
        }
        rdata
    }

    #[test]
    fn should_return_soa_when_decode_given_full_rdata() {
        let rdata = soa_rdata();
        let mut bytes = vec![0u8, 0, 6, 0, 1, 0, 0, 0, 10, 0, rdata.len() as u8];
        bytes.extend(&rdata);
        let mut cursor = Cursor::new(&bytes);

        let record = ResourceRecord::try_from(&mut cursor).unwrap();

        let expected = Soa::new("ns.", "admin.", 2021, 3600, 600, 86400, 60).unwrap();
        assert_eq!(&RecordData::Soa(expected), record.data());
        assert_eq!(31, record.rd_length());
        assert_eq!(bytes, record.to_bytes().unwrap());
    }

    #[test]
    fn should_return_incomplete_when_decode_given_missing_minimum() {
        let rdata = soa_rdata();
        let mut cursor = Cursor::new(&rdata[..rdata.len() - 2]);

        let result = Soa::decode(&mut cursor);

        assert!(result.unwrap_err().is_incomplete());
    }

    #[test]
    fn should_compare_counters_when_eq_given_same_names() {
        let first = Soa::new("ns.", "admin.", 1, 2, 3, 4, 5).unwrap();
        let mut second = Soa::new("NS.", "Admin.", 1, 2, 3, 4, 5).unwrap();

        assert_eq!(first, second);
        second.set_minimum(6);
        assert_ne!(first, second);
    }
}
