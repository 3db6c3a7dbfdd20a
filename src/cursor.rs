use crate::error::{DnsError, Result};
use std::convert::TryInto;

/// Big-endian reader over a borrowed byte slice.
///
/// Every read is bounds checked: running off the end yields
/// [`DnsError::Incomplete`], never a panic.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    current: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Cursor { buf, current: 0 }
    }

    pub fn take(&mut self) -> Result<u8> {
        let result = self.peek()?;
        self.current += 1;
        Ok(result)
    }

    pub fn peek(&self) -> Result<u8> {
        self.buf
            .get(self.current)
            .copied()
            .ok_or_else(|| self.out_of_bytes(1))
    }

    pub fn take_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(self.out_of_bytes(len));
        }
        let result = &self.buf[self.current..self.current + len];
        self.current += len;
        Ok(result)
    }

    pub fn take_bytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        let slice = self.take_slice(N)?;
        slice.try_into().map_err(|_| self.out_of_bytes(N))
    }

    pub fn take_u16(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.take_bytes()?))
    }

    pub fn take_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.take_bytes()?))
    }

    /// Splits off the next `len` bytes as an independent cursor and moves
    /// past them.
    pub fn sub_cursor(&mut self, len: usize) -> Result<Cursor<'a>> {
        Ok(Cursor::new(self.take_slice(len)?))
    }

    pub fn get_current_index(&self) -> usize {
        self.current
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.current
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    fn out_of_bytes(&self, wanted: usize) -> DnsError {
        DnsError::incomplete(format!(
            "needed {} byte(s) at offset {}, only {} remain",
            wanted,
            self.current,
            self.remaining()
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::cursor::Cursor;

    #[test]
    fn should_read_big_endian_values_when_take_given_enough_bytes() {
        let bytes = [0x01, 0x02, 0x00, 0x00, 0x01, 0x00, 0xff];
        let mut cursor = Cursor::new(&bytes);

        let short = cursor.take_u16().unwrap();
        let int = cursor.take_u32().unwrap();
        let byte = cursor.take().unwrap();

        assert_eq!(0x0102, short);
        assert_eq!(256, int);
        assert_eq!(0xff, byte);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn should_return_incomplete_when_take_slice_given_too_few_bytes() {
        let bytes = [1u8, 2, 3];
        let mut cursor = Cursor::new(&bytes);

        let result = cursor.take_slice(4);

        assert!(result.unwrap_err().is_incomplete());
        assert_eq!(0, cursor.get_current_index());
    }

    #[test]
    fn should_bound_sub_cursor_when_call_sub_cursor_given_longer_buffer() {
        let bytes = [1u8, 2, 3, 4, 5];
        let mut cursor = Cursor::new(&bytes);

        let mut sub = cursor.sub_cursor(2).unwrap();

        assert_eq!(3, cursor.remaining());
        assert_eq!(1, sub.take().unwrap());
        assert_eq!(2, sub.take().unwrap());
        assert!(sub.take().unwrap_err().is_incomplete());
    }
}
