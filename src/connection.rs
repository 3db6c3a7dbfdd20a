//! Length-prefixed frames over tokio streams.

use crate::buffer::Deframer;
use crate::error::{DnsError, Result};
use crate::framer::frame;
use futures_util::stream::{self, Stream};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

const READ_CHUNK_LEN: usize = 512;

pub struct FrameReader<R> {
    reader: R,
    deframer: Deframer,
    chunk: [u8; READ_CHUNK_LEN],
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        FrameReader {
            reader,
            deframer: Deframer::new(),
            chunk: [0u8; READ_CHUNK_LEN],
        }
    }

    /// Frames already buffered are handed out before the reader is touched.
    /// `Ok(None)` means the peer closed between frames.
    pub async fn next_frame(&mut self) -> Result<Option<Vec<u8>>> {
        if let Some(frame) = self.deframer.supply(&[]) {
            return Ok(Some(frame));
        }
        loop {
            let read = self.reader.read(&mut self.chunk).await?;
            if read == 0 {
                return if self.deframer.is_empty() {
                    Ok(None)
                } else {
                    Err(DnsError::incomplete(format!(
                        "peer closed with {} byte(s) of a partial frame",
                        self.deframer.buffered_len()
                    )))
                };
            }
            if let Some(frame) = self.deframer.supply(&self.chunk[..read]) {
                return Ok(Some(frame));
            }
        }
    }

    /// Ends after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<u8>>> {
        stream::unfold(Some(self), |state| async move {
            let mut reader = state?;
            match reader.next_frame().await {
                Ok(Some(frame)) => Some((Ok(frame), Some(reader))),
                Ok(None) => None,
                Err(e) => Some((Err(e), None)),
            }
        })
    }
}

pub async fn write_frame_async<W: AsyncWrite + Unpin>(writer: &mut W, bytes: &[u8]) -> Result<()> {
    writer.write_all(&frame(bytes)?).await?;
    writer.flush().await?;
    Ok(())
}
