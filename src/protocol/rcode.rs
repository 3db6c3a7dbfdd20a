use crate::error::{DnsError, Result};
use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum RCode {
    NoError,
    FormatError,
    ServerFailure,
    NameError,
    NotImplemented,
    Refused,
}

impl RCode {
    pub fn from_value(value: u8) -> Result<Self> {
        match value {
            0 => Ok(RCode::NoError),
            1 => Ok(RCode::FormatError),
            2 => Ok(RCode::ServerFailure),
            3 => Ok(RCode::NameError),
            4 => Ok(RCode::NotImplemented),
            5 => Ok(RCode::Refused),
            v => Err(DnsError::validation("rcode value out of valid range", v)),
        }
    }

    pub fn value(&self) -> u8 {
        match self {
            RCode::NoError => 0,
            RCode::FormatError => 1,
            RCode::ServerFailure => 2,
            RCode::NameError => 3,
            RCode::NotImplemented => 4,
            RCode::Refused => 5,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RCode::NoError => "No error condition",
            RCode::FormatError => "The name server was unable to interpret the query",
            RCode::ServerFailure => {
                "The name server was unable to process this query due to a problem with the name server"
            }
            RCode::NameError => "The domain name referenced in the query does not exist",
            RCode::NotImplemented => "The name server does not support the requested kind of query",
            RCode::Refused => "The name server refuses to perform the specified operation",
        }
    }
}

impl TryFrom<u8> for RCode {
    type Error = DnsError;

    fn try_from(value: u8) -> Result<Self> {
        RCode::from_value(value)
    }
}

impl Display for RCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RCode::NoError => "NOERROR",
            RCode::FormatError => "FORMATERROR",
            RCode::ServerFailure => "SERVERFAILURE",
            RCode::NameError => "NAMEERROR",
            RCode::NotImplemented => "NOTIMPLEMENTED",
            RCode::Refused => "REFUSED",
        };
        write!(f, "{}", name)
    }
}
