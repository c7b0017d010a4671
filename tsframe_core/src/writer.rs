use crate::error::{FrameError, Result, WriteStep};
use crate::format::{encode_length, MAX_FRAME_LEN};
use crate::framed::FramedCodec;
use crate::record::{Record, RecordWriter};
use crate::stream::Stream;

impl<S: Stream> FramedCodec<S> {
    /// Marshal, compress, and append one frame.
    ///
    /// # Write sequence
    /// 1. Size the marshal buffer to exactly `record.size()` bytes.
    /// 2. Marshal in place; a byte count that differs from the declared
    ///    size is [`FrameError::SizeMismatch`].
    /// 3. Compress into the encoded buffer.
    /// 4. Write `[len: u32 BE][payload]`.
    ///
    /// Nothing reaches the stream unless steps 1-3 succeed. An I/O error in
    /// step 4 may leave a partial frame behind.
    pub fn write_next<R: Record>(&mut self, record: &R) -> Result<()> {
        let size = record.size();
        let buf = self.marshaled.as_mut_slice(size);
        let written = record.marshal_to(buf).map_err(FrameError::Marshal)?;
        if written != size {
            return Err(FrameError::SizeMismatch {
                expected: size,
                actual: written,
            });
        }

        self.compressor
            .encode(self.marshaled.as_slice(), &mut self.encoded)
            .map_err(FrameError::Encode)?;

        let payload = self.encoded.as_slice();
        if payload.len() > MAX_FRAME_LEN {
            return Err(FrameError::FrameTooLarge(payload.len()));
        }
        let len = payload.len() as u32;

        self.stream
            .write_all(&encode_length(len))
            .map_err(|source| FrameError::Write {
                step: WriteStep::Length,
                source,
            })?;
        self.stream
            .write_all(payload)
            .map_err(|source| FrameError::Write {
                step: WriteStep::Payload,
                source,
            })?;

        Ok(())
    }
}

impl<S: Stream, R: Record> RecordWriter<R> for FramedCodec<S> {
    fn write_next(&mut self, record: &R) -> Result<()> {
        FramedCodec::write_next(self, record)
    }
}
