//! Wire format of the simplified DNS protocol.

pub mod header;
pub mod message;
pub mod name;
pub mod question;
pub mod rcode;
pub mod resource;

pub use message::{Message, Query, Response};
pub use name::validate_domain_name;
pub use rcode::RCode;
pub use resource::{RecordData, ResourceRecord};
