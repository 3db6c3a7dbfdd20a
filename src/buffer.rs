use crate::framer::LENGTH_PREFIX_LEN;

const INITIAL_CAPACITY: usize = 512;

/// Reassembles length-prefixed frames from chunks of any size.
///
/// Bytes are appended at `current`; once two are buffered the declared frame
/// length is latched until that frame has been handed out.
pub struct Deframer {
    buf: Vec<u8>,
    current: usize,
    declared: Option<usize>,
}

impl Deframer {
    pub fn new() -> Self {
        Deframer {
            buf: vec![0u8; INITIAL_CAPACITY],
            current: 0,
            declared: None,
        }
    }

    /// Appends `chunk` and returns the next complete frame, if any.
    ///
    /// At most one frame is returned per call. Call again with an empty chunk
    /// to drain further frames that are already buffered.
    pub fn supply(&mut self, chunk: &[u8]) -> Option<Vec<u8>> {
        self.append(chunk);
        self.latch();
        let declared = self.declared?;
        let frame_end = LENGTH_PREFIX_LEN + declared;
        if self.current < frame_end {
            return None;
        }
        let frame = self.buf[LENGTH_PREFIX_LEN..frame_end].to_vec();
        self.buf.copy_within(frame_end..self.current, 0);
        self.current -= frame_end;
        self.declared = None;
        if self.current == 0 && self.buf.len() > INITIAL_CAPACITY {
            self.buf.truncate(INITIAL_CAPACITY);
            self.buf.shrink_to_fit();
        }
        self.latch();
        Some(frame)
    }

    /// True when no partial frame bytes are held.
    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    pub fn buffered_len(&self) -> usize {
        self.current
    }

    /// Bytes currently reserved for buffering.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    fn append(&mut self, chunk: &[u8]) {
        let needed = self.current + chunk.len();
        if needed > self.buf.len() {
            let grown = (self.buf.len() * 2).max(needed);
            self.buf.resize(grown, 0);
        }
        self.buf[self.current..needed].copy_from_slice(chunk);
        self.current = needed;
    }

    fn latch(&mut self) {
        if self.declared.is_none() && self.current >= LENGTH_PREFIX_LEN {
            self.declared = Some(u16::from_be_bytes([self.buf[0], self.buf[1]]) as usize);
        }
    }
}

impl Default for Deframer {
    fn default() -> Self {
        Deframer::new()
    }
}
