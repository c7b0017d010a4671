use std::io::{self, ErrorKind, Read};
use std::marker::PhantomData;
use std::time::Instant;

use crate::error::{FrameError, Result};
use crate::format::{decode_length, LENGTH_PREFIX_SIZE};
use crate::framed::FramedCodec;
use crate::record::{Record, RecordReader};
use crate::stream::Stream;

impl<S: Stream> FramedCodec<S> {
    /// Read and decode the next frame.
    ///
    /// # Read sequence
    /// 1. Throttled progress report (never fails the read).
    /// 2. 4-byte big-endian length `L`; a clean EOF here is
    ///    [`FrameError::EndOfStream`].
    /// 3. `L` bytes into the raw buffer.
    /// 4. Decompress into the decoded buffer.
    /// 5. Unmarshal exactly the decoded bytes.
    pub fn read_next<R: Record>(&mut self) -> Result<R> {
        self.report_progress();

        let len = self.read_length()?;

        self.read_payload(len)?;

        self.compressor
            .decode(self.raw.as_slice(), &mut self.decoded)
            .map_err(FrameError::Decode)?;

        R::unmarshal(self.decoded.as_slice()).map_err(FrameError::Unmarshal)
    }

    /// Iterate over the remaining records until the stream ends.
    ///
    /// End of stream finishes the iteration; any other error is yielded
    /// once and iteration stops after it.
    pub fn records<R: Record>(&mut self) -> Records<'_, S, R> {
        Records {
            codec: self,
            done: false,
            _record: PhantomData,
        }
    }

    fn report_progress(&mut self) {
        let stream = &mut self.stream;
        self.progress.observe(Instant::now(), || stream.offset());
    }

    /// Read exactly `len` payload bytes into the raw buffer.
    ///
    /// Only bytes that actually arrive are written, so a corrupt prefix on a
    /// short stream costs a reservation, never a zero-fill of `len` bytes.
    fn read_payload(&mut self, len: u32) -> Result<()> {
        let raw = self.raw.try_recycle(len as usize).map_err(|e| FrameError::PayloadRead {
            len,
            source: io::Error::new(ErrorKind::OutOfMemory, e),
        })?;
        let n = Read::take(&mut self.stream, u64::from(len))
            .read_to_end(raw)
            .map_err(|source| FrameError::PayloadRead { len, source })?;
        if n < len as usize {
            return Err(FrameError::PayloadRead {
                len,
                source: io::Error::new(
                    ErrorKind::UnexpectedEof,
                    format!("payload truncated after {} of {} bytes", n, len),
                ),
            });
        }
        Ok(())
    }

    /// Read the length prefix, telling a clean end of data apart from a
    /// prefix cut short.
    fn read_length(&mut self) -> Result<u32> {
        let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
        let mut filled = 0;
        while filled < LENGTH_PREFIX_SIZE {
            match self.stream.read(&mut prefix[filled..]) {
                Ok(0) if filled == 0 => return Err(FrameError::EndOfStream),
                Ok(0) => {
                    return Err(FrameError::Framing(io::Error::new(
                        ErrorKind::UnexpectedEof,
                        format!(
                            "length prefix truncated after {} of {} bytes",
                            filled, LENGTH_PREFIX_SIZE
                        ),
                    )))
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(FrameError::Framing(e)),
            }
        }
        Ok(decode_length(prefix))
    }
}

impl<S: Stream, R: Record> RecordReader<R> for FramedCodec<S> {
    fn read_next(&mut self) -> Result<R> {
        FramedCodec::read_next(self)
    }
}

/// Iterator returned by [`FramedCodec::records`].
pub struct Records<'a, S: Stream, R> {
    codec: &'a mut FramedCodec<S>,
    done: bool,
    _record: PhantomData<fn() -> R>,
}

impl<'a, S: Stream, R: Record> Iterator for Records<'a, S, R> {
    type Item = Result<R>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.codec.read_next() {
            Ok(record) => Some(Ok(record)),
            Err(FrameError::EndOfStream) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
