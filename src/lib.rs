//! A simplified DNS wire protocol spoken over TCP, with a small name
//! server and a blocking resolver client built on it.

#[macro_use]
extern crate log;

pub mod buffer;
pub mod client;
pub mod config;
pub mod connection;
pub mod cursor;
pub mod error;
pub mod framer;
pub mod handler;
pub mod master;
pub mod protocol;
pub mod server;

pub use error::{DnsError, Result};
