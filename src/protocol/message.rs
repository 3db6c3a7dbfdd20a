use crate::cursor::Cursor;
use crate::error::{DnsError, Result};
use crate::protocol::header::Header;
use crate::protocol::name::check_domain_name;
use crate::protocol::question::Question;
use crate::protocol::rcode::RCode;
use crate::protocol::resource::ResourceRecord;
use std::convert::TryFrom;
use std::hash::{Hash, Hasher};

const QUERY_FLAGS: u16 = 0x0100;
const RESPONSE_FLAGS: u16 = 0x8100;
const MAX_QUERY_FLAGS_HIGH: u8 = 0x07;
const MIN_RESPONSE_FLAGS_HIGH: u8 = 0x80;
const MAX_RESPONSE_FLAGS_HIGH: u8 = 0x87;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Message {
    Query(Query),
    Response(Response),
}

impl Message {
    /// Decodes one whole message. Every byte of `bytes` must belong to it.
    pub fn decode(bytes: &[u8]) -> Result<Message> {
        let mut cursor = Cursor::new(bytes);
        let header = Header::try_from(&mut cursor)?;
        if header.question_count != 1 {
            return Err(DnsError::validation(
                "Message must carry exactly one question",
                header.question_count,
            ));
        }
        let question = Question::try_from(&mut cursor)?;
        let message = if header.is_response() {
            Message::Response(Response::decode(&header, question, &mut cursor)?)
        } else {
            Message::Query(Query::decode(&header, question)?)
        };
        if !cursor.is_exhausted() {
            return Err(DnsError::validation(
                "Trailing bytes after message",
                cursor.remaining(),
            ));
        }
        Ok(message)
    }

    pub fn encode(&self) -> Vec<u8> {
        match self {
            Message::Query(query) => query.encode(),
            Message::Response(response) => response.encode(),
        }
    }

    pub fn id(&self) -> u16 {
        match self {
            Message::Query(query) => query.id(),
            Message::Response(response) => response.id(),
        }
    }

    pub fn query(&self) -> &str {
        match self {
            Message::Query(query) => query.query(),
            Message::Response(response) => response.query(),
        }
    }

    /// Always [`RCode::NoError`] for a query.
    pub fn rcode(&self) -> RCode {
        match self {
            Message::Query(_) => RCode::NoError,
            Message::Response(response) => response.rcode(),
        }
    }

    pub fn is_response(&self) -> bool {
        matches!(self, Message::Response(_))
    }
}

impl From<Query> for Message {
    fn from(query: Query) -> Self {
        Message::Query(query)
    }
}

impl From<Response> for Message {
    fn from(response: Response) -> Self {
        Message::Response(response)
    }
}

#[derive(Debug, Clone)]
pub struct Query {
    id: u16,
    query: String,
}

impl Query {
    pub fn new(id: u16, query: &str) -> Result<Self> {
        check_domain_name(query)?;
        Ok(Query {
            id,
            query: query.to_string(),
        })
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_id(&mut self, id: u16) -> &mut Self {
        self.id = id;
        self
    }

    pub fn set_query(&mut self, query: &str) -> Result<&mut Self> {
        check_domain_name(query)?;
        self.query = query.to_string();
        Ok(self)
    }

    fn decode(header: &Header, question: Question) -> Result<Self> {
        if header.flags_high() > MAX_QUERY_FLAGS_HIGH {
            return Err(DnsError::validation(
                "Query opcode must be 0",
                format!("0x{:02X}", header.flags_high()),
            ));
        }
        if header.rcode_bits() != 0 {
            return Err(DnsError::validation(
                "Query rcode must be 0",
                header.rcode_bits(),
            ));
        }
        let records = [
            header.answer_count,
            header.authority_count,
            header.additional_count,
        ];
        if let Some(count) = records.iter().find(|count| **count != 0) {
            return Err(DnsError::validation(
                "Query must not carry resource records",
                count,
            ));
        }
        Ok(Query {
            id: header.id,
            query: question.name,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let header = Header {
            id: self.id,
            flags: QUERY_FLAGS,
            question_count: 1,
            answer_count: 0,
            authority_count: 0,
            additional_count: 0,
        };
        let mut result: Vec<u8> = (&header).into();
        let question: Vec<u8> = (&Question { name: self.query.clone() }).into();
        result.extend(question);
        result
    }
}

impl PartialEq for Query {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.query.eq_ignore_ascii_case(&other.query)
    }
}

impl Eq for Query {}

impl Hash for Query {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.query.to_ascii_lowercase().hash(state);
    }
}

#[derive(Debug, Clone)]
pub struct Response {
    id: u16,
    query: String,
    rcode: RCode,
    answers: Vec<ResourceRecord>,
    name_servers: Vec<ResourceRecord>,
    additionals: Vec<ResourceRecord>,
}

impl Response {
    pub fn new(id: u16, query: &str, rcode: RCode) -> Result<Self> {
        check_domain_name(query)?;
        Ok(Response {
            id,
            query: query.to_string(),
            rcode,
            answers: Vec::new(),
            name_servers: Vec::new(),
            additionals: Vec::new(),
        })
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn rcode(&self) -> RCode {
        self.rcode
    }

    pub fn answers(&self) -> &[ResourceRecord] {
        &self.answers
    }

    pub fn name_servers(&self) -> &[ResourceRecord] {
        &self.name_servers
    }

    pub fn additionals(&self) -> &[ResourceRecord] {
        &self.additionals
    }

    pub fn set_id(&mut self, id: u16) -> &mut Self {
        self.id = id;
        self
    }

    pub fn set_query(&mut self, query: &str) -> Result<&mut Self> {
        check_domain_name(query)?;
        self.query = query.to_string();
        Ok(self)
    }

    pub fn set_rcode(&mut self, rcode: RCode) -> &mut Self {
        self.rcode = rcode;
        self
    }

    /// Returns false when an equal record is already present.
    pub fn add_answer(&mut self, record: ResourceRecord) -> bool {
        push_unique(&mut self.answers, record)
    }

    pub fn add_name_server(&mut self, record: ResourceRecord) -> bool {
        push_unique(&mut self.name_servers, record)
    }

    pub fn add_additional(&mut self, record: ResourceRecord) -> bool {
        push_unique(&mut self.additionals, record)
    }

    fn decode(header: &Header, question: Question, cursor: &mut Cursor<'_>) -> Result<Self> {
        if !(MIN_RESPONSE_FLAGS_HIGH..=MAX_RESPONSE_FLAGS_HIGH).contains(&header.flags_high()) {
            return Err(DnsError::validation(
                "Response opcode must be 0",
                format!("0x{:02X}", header.flags_high()),
            ));
        }
        let rcode = RCode::from_value(header.rcode_bits())?;
        Ok(Response {
            id: header.id,
            query: question.name,
            rcode,
            answers: decode_section(cursor, header.answer_count)?,
            name_servers: decode_section(cursor, header.authority_count)?,
            additionals: decode_section(cursor, header.additional_count)?,
        })
    }

    /// Records that cannot be encoded are left out and the section counts
    /// reflect what was actually written.
    pub fn encode(&self) -> Vec<u8> {
        let (answer_count, answers) = encode_section(&self.answers);
        let (authority_count, name_servers) = encode_section(&self.name_servers);
        let (additional_count, additionals) = encode_section(&self.additionals);
        let header = Header {
            id: self.id,
            flags: RESPONSE_FLAGS | self.rcode.value() as u16,
            question_count: 1,
            answer_count,
            authority_count,
            additional_count,
        };
        let mut result: Vec<u8> = (&header).into();
        let question: Vec<u8> = (&Question { name: self.query.clone() }).into();
        result.extend(question);
        result.extend(answers);
        result.extend(name_servers);
        result.extend(additionals);
        result
    }
}

fn push_unique(section: &mut Vec<ResourceRecord>, record: ResourceRecord) -> bool {
    if section.contains(&record) {
        return false;
    }
    section.push(record);
    true
}

fn decode_section(cursor: &mut Cursor<'_>, count: u16) -> Result<Vec<ResourceRecord>> {
    (0..count)
        .map(|_| ResourceRecord::try_from(&mut *cursor))
        .collect()
}

fn encode_section(records: &[ResourceRecord]) -> (u16, Vec<u8>) {
    let mut count = 0u16;
    let mut buf = Vec::new();
    for record in records {
        if count == u16::MAX {
            debug!("section full, drop record {} from response", record);
            continue;
        }
        match record.encode(&mut buf) {
            Ok(()) => count += 1,
            Err(e) => debug!("drop record {} from response: {}", record, e),
        }
    }
    (count, buf)
}

impl PartialEq for Response {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.query.eq_ignore_ascii_case(&other.query)
            && self.rcode == other.rcode
            && self.answers == other.answers
            && self.name_servers == other.name_servers
            && self.additionals == other.additionals
    }
}

impl Eq for Response {}

impl Hash for Response {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.query.to_ascii_lowercase().hash(state);
        self.rcode.hash(state);
        self.answers.hash(state);
        self.name_servers.hash(state);
        self.additionals.hash(state);
    }
}
