//! Blocking two-byte length-prefix framing, one message at a time.

use crate::error::{DnsError, Result};
use std::io::{ErrorKind, Read, Write};

pub const LENGTH_PREFIX_LEN: usize = 2;
pub const MAX_FRAME_LEN: usize = u16::MAX as usize;

pub fn frame(bytes: &[u8]) -> Result<Vec<u8>> {
    if bytes.len() > MAX_FRAME_LEN {
        return Err(DnsError::validation(
            "Message too long to frame",
            bytes.len(),
        ));
    }
    let mut result = Vec::with_capacity(LENGTH_PREFIX_LEN + bytes.len());
    result.extend(&(bytes.len() as u16).to_be_bytes());
    result.extend(bytes);
    Ok(result)
}

pub fn write_frame<W: Write>(writer: &mut W, bytes: &[u8]) -> Result<()> {
    writer.write_all(&frame(bytes)?)?;
    writer.flush()?;
    Ok(())
}

/// Blocks until one whole frame has been read.
///
/// Returns `Ok(None)` when the stream ends cleanly between frames. A stream
/// that ends inside a frame is [`DnsError::Incomplete`].
pub fn next_frame<R: Read>(reader: &mut R) -> Result<Option<Vec<u8>>> {
    let mut prefix = [0u8; LENGTH_PREFIX_LEN];
    match read_full(reader, &mut prefix)? {
        0 => return Ok(None),
        LENGTH_PREFIX_LEN => {}
        n => {
            return Err(DnsError::incomplete(format!(
                "stream closed after {} of {} length bytes",
                n, LENGTH_PREFIX_LEN
            )))
        }
    }
    let len = u16::from_be_bytes(prefix) as usize;
    let mut payload = vec![0u8; len];
    let read = read_full(reader, &mut payload)?;
    if read < len {
        return Err(DnsError::incomplete(format!(
            "stream closed after {} of {} frame bytes",
            read, len
        )));
    }
    Ok(Some(payload))
}

fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
