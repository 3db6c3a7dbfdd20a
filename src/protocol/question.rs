use crate::cursor::Cursor;
use crate::error::{DnsError, Result};
use crate::protocol::name::{decode_name, encode_name};
use std::convert::TryFrom;

/// Every question is asked for any record type in the Internet class.
pub const QUESTION_TYPE: u16 = 0x00FF;
pub const QUESTION_CLASS: u16 = 0x0001;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Question {
    pub name: String,
}

impl<'a, 'b> TryFrom<&'a mut Cursor<'b>> for Question {
    type Error = DnsError;

    fn try_from(cursor: &'a mut Cursor<'b>) -> Result<Self> {
        let name = decode_name(cursor)?;
        // type and class are read but not checked
        cursor
            .take_slice(4)
            .map_err(|_| DnsError::validation("Question is missing its type/class trailer", &name))?;
        Ok(Question { name })
    }
}

impl From<&Question> for Vec<u8> {
    fn from(question: &Question) -> Self {
        let mut result = Vec::new();
        encode_name(&question.name, &mut result);
        result.extend(&QUESTION_TYPE.to_be_bytes());
        result.extend(&QUESTION_CLASS.to_be_bytes());
        result
    }
}
